use serde::{Deserialize, Serialize};
use tilecast_common::Rgba;

use crate::RenderError;

/// Renderer configuration: output size, march bound and shading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Longest ray march, in cells. Must be finite.
    pub max_ray_length: f64,
    pub ceiling: Rgba,
    pub floor: Rgba,
    /// Wall brightness is `1 / (1 + d * fog_density)`.
    pub fog_density: f64,
    /// Lower bound on distance shading.
    pub min_brightness: f64,
    /// Multiplier for walls hit on a y-side.
    pub side_shade: f64,
    /// Multiplier for hits close to a cell edge.
    pub edge_shade: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            max_ray_length: 64.0,
            ceiling: Rgba::rgb(48, 52, 64),
            floor: Rgba::rgb(92, 84, 72),
            fog_density: 0.15,
            min_brightness: 0.2,
            side_shade: 0.75,
            edge_shade: 0.8,
        }
    }
}

impl RenderConfig {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::ZeroSize {
                width: self.width,
                height: self.height,
            });
        }
        if !self.max_ray_length.is_finite() || self.max_ray_length <= 0.0 {
            return Err(RenderError::InvalidMaxRayLength(self.max_ray_length));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = RenderConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_ray_length, 64.0);
    }

    #[test]
    fn rejects_zero_size_and_unbounded_rays() {
        assert!(matches!(
            RenderConfig::with_size(0, 10).validate(),
            Err(RenderError::ZeroSize { .. })
        ));
        for len in [0.0, -1.0, f64::INFINITY, f64::NAN] {
            let config = RenderConfig {
                max_ray_length: len,
                ..RenderConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(RenderError::InvalidMaxRayLength(_))
            ));
        }
    }
}
