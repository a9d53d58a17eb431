//! Rendering: turns a [`Scene`](tilecast_world::Scene) into an RGBA framebuffer.
//!
//! # Invariants
//! - The renderer only borrows the scene; it never mutates it.
//! - Every frame fully overwrites the framebuffer and the depth buffer.
//! - Ray marches are bounded by a finite maximum length.
//! - Degenerate distances are clamped locally; rendering never fails.

mod config;
mod framebuffer;
mod present;
pub mod raycast;
mod renderer;
pub mod shading;
pub mod sprites;

pub use config::RenderConfig;
pub use framebuffer::FrameBuffer;
pub use present::{PresentError, Presenter};
pub use raycast::{RayHit, Side, cast_ray, column_angle, projected_height};
pub use renderer::{RaycastRenderer, RenderError, Renderer};
pub use sprites::{SpriteProjection, project_sprites};

pub fn crate_info() -> &'static str {
    "tilecast-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
