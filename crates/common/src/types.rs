use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Discrete sprite identifier for a non-player actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpriteKind(pub u32);

/// A non-player actor positioned in the world.
///
/// `z` is an elevation hint used by the sprite projection; `angle` is the
/// facing direction and does not affect rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub kind: SpriteKind,
}

impl Entity {
    /// Entity at `(x, y)` on the ground, facing east.
    pub fn new(x: f64, y: f64, kind: SpriteKind) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            angle: 0.0,
            kind,
        }
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// The viewpoint actor: position, view angle and horizontal field of view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    /// Horizontal field of view in radians. Fixed once constructed.
    pub fov: f64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            angle: 0.0,
            fov: std::f64::consts::FRAC_PI_3,
        }
    }
}

impl Player {
    pub fn new(x: f64, y: f64, angle: f64, fov: f64) -> Self {
        Self { x, y, angle, fov }
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Unit vector along the current view angle.
    pub fn forward(&self) -> DVec2 {
        DVec2::from_angle(self.angle)
    }

    /// Unit vector perpendicular to `forward`, pointing toward increasing
    /// screen columns.
    pub fn right(&self) -> DVec2 {
        self.forward().perp()
    }

    /// Translate by `distance` along the current facing vector.
    pub fn advance(&mut self, distance: f64) {
        self.x += self.angle.cos() * distance;
        self.y += self.angle.sin() * distance;
    }
}
