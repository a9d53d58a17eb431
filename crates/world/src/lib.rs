//! World: the static tile map and the scene aggregate the renderer consumes.
//!
//! # Invariants
//! - Map dimensions are fixed at construction and never zero.
//! - Out-of-bounds cells are solid, so every ray march terminates.
//! - A scene holds exactly one map and one player; malformed scenes are
//!   rejected when built, never discovered mid-render.

pub mod demo;
mod error;
pub mod file;
pub mod map;
pub mod scene;

pub use error::SceneError;
pub use file::SceneFile;
pub use map::{Cell, Map};
pub use scene::{Scene, Splash};

pub fn crate_info() -> &'static str {
    "tilecast-world v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("world"));
    }
}
