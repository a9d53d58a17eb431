//! wgpu presentation backend.
//!
//! The raycaster renders on the CPU; this crate only copies each finished
//! frame into a texture and stretches it over the window surface.
//!
//! # Invariants
//! - The uploaded frame keeps the size it was created with; window resizes
//!   reconfigure the surface and the frame is scaled to fit.
//! - Pixel data is copied during `present` and never retained.

mod blit;
mod shaders;
mod surface;

pub use blit::FrameBlitter;
pub use surface::WgpuPresenter;
