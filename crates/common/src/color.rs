use serde::{Deserialize, Serialize};

/// 8-bit-per-channel color in R, G, B, A byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Scale RGB by `factor` (clamped to `[0, 1]`), keeping alpha.
    pub fn shade(self, factor: f64) -> Self {
        let f = if factor.is_nan() { 0.0 } else { factor.clamp(0.0, 1.0) };
        let scale = |c: u8| (c as f64 * f).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b), self.a)
    }
}
