use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the A/D keys move the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrafeMode {
    /// A adds `strafe_step` to `y`, D subtracts it, whatever the facing.
    #[default]
    Fixed,
    /// Move sideways relative to the facing vector: A toward the left edge
    /// of the view, D toward the right edge.
    Perpendicular,
}

/// Whether per-frame motion is scaled by elapsed time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementTiming {
    /// Mouse turning is applied once per frame, unscaled.
    #[default]
    FrameCoupled,
    /// Mouse turning is scaled by `elapsed * reference_fps`, so a frame that
    /// takes exactly `1 / reference_fps` seconds turns as much as a
    /// frame-coupled one. The first frame after startup has nothing to
    /// measure against and turns unscaled.
    Scaled { reference_fps: f64 },
}

impl MovementTiming {
    /// Multiplier applied to this frame's turning. `elapsed` is `None` on
    /// the first gameplay frame.
    pub fn factor(&self, elapsed: Option<Duration>) -> f64 {
        match (*self, elapsed) {
            (Self::Scaled { reference_fps }, Some(elapsed)) => elapsed.as_secs_f64() * reference_fps,
            _ => 1.0,
        }
    }
}

/// Player control tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// World units per W/S key press.
    pub move_step: f64,
    /// World units per A/D key press.
    pub strafe_step: f64,
    /// Radians of turn per unit of horizontal mouse motion.
    pub turn_scale: f64,
    pub strafe_mode: StrafeMode,
    pub movement_timing: MovementTiming,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            move_step: 0.1,
            strafe_step: 0.1,
            turn_scale: std::f64::consts::PI / 360.0,
            strafe_mode: StrafeMode::Fixed,
            movement_timing: MovementTiming::FrameCoupled,
        }
    }
}
