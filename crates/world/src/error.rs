use std::path::PathBuf;

/// Errors from building or loading a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("map grid must be non-empty, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("map has {cells} cells but {width}x{height} requires {expected}")]
    CellCountMismatch {
        width: usize,
        height: usize,
        cells: usize,
        expected: usize,
    },
    #[error("map row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown map character {ch:?} at row {row}, column {col}")]
    InvalidCell { ch: char, row: usize, col: usize },
    #[error("cell size must be finite and positive, got {0}")]
    InvalidCellSize(f64),
    #[error("field of view must lie in (0, pi), got {0}")]
    InvalidFov(f64),
    #[error("{0} has a non-finite coordinate")]
    NonFinite(String),
    #[error("failed to read scene file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported scene file extension: {0}")]
    UnsupportedFormat(String),
}
