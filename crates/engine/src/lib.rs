//! Engine: the game loop that ties input, scene state, rendering and
//! presentation together.
//!
//! # Invariants
//! - The loop is single-threaded; the scene has one writer (the controller)
//!   and the renderer only borrows it for the duration of `render`.
//! - Startup is renderer, observer registration, window. Shutdown is
//!   renderer, observer deregistration, window.
//! - A quit request is observed at the top of the next iteration, so the
//!   frame in which it arrives still renders and presents.

mod app;
mod config;
mod controller;
pub mod fps;
mod headless;
mod window;

pub use app::{App, AppError};
pub use config::{ControlConfig, MovementTiming, StrafeMode};
pub use controller::Controller;
pub use fps::{Clock, FpsCounter, FrameTimer, ManualClock, SystemClock};
pub use headless::HeadlessWindow;
pub use window::Window;

pub fn crate_info() -> &'static str {
    "tilecast-engine v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("engine"));
    }
}
