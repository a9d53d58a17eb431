use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::SceneError;

/// A single grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    /// Solid wall carrying a type id used for palette selection.
    Wall(u8),
}

impl Cell {
    pub fn is_wall(self) -> bool {
        matches!(self, Cell::Wall(_))
    }

    /// Parse a map character: space or `.` is empty, a digit is a wall type.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            ' ' | '.' => Some(Cell::Empty),
            '0'..='9' => Some(Cell::Wall(ch as u8 - b'0')),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Wall(t) => char::from_digit(u32::from(t % 10), 10).unwrap_or('0'),
        }
    }
}

/// Static grid of wall cells. Row-major, `y` selects the row.
///
/// Queries outside the grid report a solid wall so ray marches always stop
/// at the boundary at the latest.
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    width: usize,
    height: usize,
    cell_size: f64,
    cells: Vec<Cell>,
}

impl Map {
    /// Build a map from a row-major cell vector.
    pub fn new(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, SceneError> {
        if width == 0 || height == 0 {
            return Err(SceneError::EmptyGrid { width, height });
        }
        let expected = width * height;
        if cells.len() != expected {
            return Err(SceneError::CellCountMismatch {
                width,
                height,
                cells: cells.len(),
                expected,
            });
        }
        Ok(Self {
            width,
            height,
            cell_size: 1.0,
            cells,
        })
    }

    /// Parse string rows, one character per cell (see [`Cell::from_char`]).
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, SceneError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        if width == 0 || height == 0 {
            return Err(SceneError::EmptyGrid { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(SceneError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(SceneError::InvalidCell { ch, row, col })?;
                cells.push(cell);
            }
        }
        Self::new(width, height, cells)
    }

    /// A `width` x `height` grid with walls of type 0 on the border only.
    pub fn bordered(width: usize, height: usize) -> Result<Self, SceneError> {
        let mut cells = vec![Cell::Empty; width * height];
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                    cells[y * width + x] = Cell::Wall(0);
                }
            }
        }
        Self::new(width, height, cells)
    }

    /// Set the world-units-per-cell scale.
    pub fn with_cell_size(mut self, cell_size: f64) -> Result<Self, SceneError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(SceneError::InvalidCellSize(cell_size));
        }
        self.cell_size = cell_size;
        Ok(self)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// World units spanned by one cell.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn contains(&self, cell_x: i64, cell_y: i64) -> bool {
        cell_x >= 0 && cell_y >= 0 && (cell_x as usize) < self.width && (cell_y as usize) < self.height
    }

    /// Cell at the given grid coordinate. Out of bounds reports `Wall(0)`.
    pub fn cell(&self, cell_x: i64, cell_y: i64) -> Cell {
        if !self.contains(cell_x, cell_y) {
            return Cell::Wall(0);
        }
        self.cells[cell_y as usize * self.width + cell_x as usize]
    }

    pub fn is_wall(&self, cell_x: i64, cell_y: i64) -> bool {
        self.cell(cell_x, cell_y).is_wall()
    }

    /// Convert a world position into fractional cell coordinates.
    pub fn to_cell_space(&self, world: DVec2) -> DVec2 {
        world / self.cell_size
    }

    /// Grid coordinate containing a world position.
    pub fn cell_at(&self, world: DVec2) -> (i64, i64) {
        let p = self.to_cell_space(world).floor();
        (p.x as i64, p.y as i64)
    }

    /// Number of wall cells inside the grid.
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall()).count()
    }

    /// Render the grid back into string rows.
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|c| c.to_char()).collect())
            .collect()
    }
}
