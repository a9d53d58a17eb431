//! Shared types for the tilecast engine: positioned actors and packed colors.
//!
//! # Invariants
//! - Positions are world units; angles are radians.
//! - `Player` is the only actor with a field of view.

mod color;
mod types;

pub use color::Rgba;
pub use types::{Entity, Player, SpriteKind};

pub fn crate_info() -> &'static str {
    "tilecast-common v0.1.0"
}
