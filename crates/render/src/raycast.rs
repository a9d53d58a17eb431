//! Grid-stepping (DDA) ray casting against the tile map.
//!
//! All positions and distances here are in cell units.

use glam::DVec2;
use tilecast_world::{Cell, Map};

/// Which family of grid lines the ray crossed when it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// A vertical grid line (constant x).
    X,
    /// A horizontal grid line (constant y).
    Y,
}

/// Result of marching one ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the ray.
    pub distance: f64,
    /// Distance projected onto the viewer's forward axis.
    pub perpendicular: f64,
    pub side: Side,
    /// Fractional position of the hit along the wall face, in `[0, 1)`.
    pub offset: f64,
    /// Wall type that stopped the ray; `None` when the march hit its bound.
    pub wall: Option<u8>,
    /// Grid coordinate where the march stopped.
    pub cell: (i64, i64),
}

/// Ray angle for screen column `column` of `columns`.
pub fn column_angle(view_angle: f64, fov: f64, column: u32, columns: u32) -> f64 {
    view_angle - fov / 2.0 + fov * (column as f64 / columns as f64)
}

/// On-screen wall height for a perpendicular distance: `screen_h / d`.
///
/// A zero or negative distance yields the full screen height.
pub fn projected_height(screen_h: u32, distance: f64) -> f64 {
    let h = screen_h as f64;
    if distance > 0.0 { h / distance } else { h }
}

/// Per-axis DDA setup: step direction, distance to first crossing, and
/// distance between crossings.
fn axis_setup(pos: f64, cell: i64, dir: f64) -> (i64, f64, f64) {
    if dir.abs() < 1e-12 {
        return (0, f64::INFINITY, f64::INFINITY);
    }
    let delta = (1.0 / dir).abs();
    if dir < 0.0 {
        (-1, (pos - cell as f64) * delta, delta)
    } else {
        (1, (cell as f64 + 1.0 - pos) * delta, delta)
    }
}

/// March a ray from `origin` at `angle` until it enters a wall cell or
/// travels farther than `max_len`.
///
/// `view_angle` is the viewer's facing, used for the perpendicular
/// (fisheye-corrected) distance. Each step advances at least one cell, so
/// the march takes at most `2 * max_len + 2` steps.
pub fn cast_ray(map: &Map, origin: DVec2, angle: f64, view_angle: f64, max_len: f64) -> RayHit {
    let dir = DVec2::from_angle(angle);
    let cos_off = (angle - view_angle).cos();
    let mut cell = (origin.x.floor() as i64, origin.y.floor() as i64);

    if let Cell::Wall(id) = map.cell(cell.0, cell.1) {
        return RayHit {
            distance: 0.0,
            perpendicular: 0.0,
            side: Side::X,
            offset: 0.0,
            wall: Some(id),
            cell,
        };
    }

    let (step_x, mut side_x, delta_x) = axis_setup(origin.x, cell.0, dir.x);
    let (step_y, mut side_y, delta_y) = axis_setup(origin.y, cell.1, dir.y);

    loop {
        let (t, side) = if side_x < side_y {
            let t = side_x;
            side_x += delta_x;
            cell.0 += step_x;
            (t, Side::X)
        } else {
            let t = side_y;
            side_y += delta_y;
            cell.1 += step_y;
            (t, Side::Y)
        };

        if t > max_len {
            return RayHit {
                distance: max_len,
                perpendicular: max_len * cos_off,
                side,
                offset: 0.0,
                wall: None,
                cell,
            };
        }

        if let Cell::Wall(id) = map.cell(cell.0, cell.1) {
            let hit = origin + dir * t;
            let along = match side {
                Side::X => hit.y,
                Side::Y => hit.x,
            };
            return RayHit {
                distance: t,
                perpendicular: t * cos_off,
                side,
                offset: along - along.floor(),
                wall: Some(id),
                cell,
            };
        }
    }
}
