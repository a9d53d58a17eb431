//! Palettes and distance shading rules.

use tilecast_common::{Rgba, SpriteKind};

use crate::RenderConfig;
use crate::raycast::{RayHit, Side};

const WALL_PALETTE: [Rgba; 6] = [
    Rgba::rgb(160, 120, 96),
    Rgba::rgb(96, 128, 168),
    Rgba::rgb(120, 160, 104),
    Rgba::rgb(176, 168, 96),
    Rgba::rgb(144, 104, 160),
    Rgba::rgb(104, 160, 160),
];

const SPRITE_PALETTE: [Rgba; 4] = [
    Rgba::rgb(220, 64, 64),
    Rgba::rgb(64, 200, 96),
    Rgba::rgb(240, 200, 48),
    Rgba::rgb(200, 96, 220),
];

/// Hits within this fraction of a cell edge get the edge band.
const EDGE_BAND: f64 = 0.04;

pub fn wall_color(wall_type: u8) -> Rgba {
    WALL_PALETTE[wall_type as usize % WALL_PALETTE.len()]
}

pub fn sprite_color(kind: SpriteKind) -> Rgba {
    SPRITE_PALETTE[kind.0 as usize % SPRITE_PALETTE.len()]
}

/// Brightness for a surface at perpendicular distance `d`: darker with
/// distance, never below `min_brightness`.
pub fn distance_brightness(config: &RenderConfig, d: f64) -> f64 {
    let d = d.max(0.0);
    (1.0 / (1.0 + d * config.fog_density)).max(config.min_brightness)
}

/// Final wall color for a hit.
pub fn shade_wall(config: &RenderConfig, hit: &RayHit, wall_type: u8) -> Rgba {
    let mut factor = distance_brightness(config, hit.perpendicular);
    if hit.side == Side::Y {
        factor *= config.side_shade;
    }
    if hit.offset < EDGE_BAND || hit.offset > 1.0 - EDGE_BAND {
        factor *= config.edge_shade;
    }
    wall_color(wall_type).shade(factor)
}

/// Floor color for screen row `y`: dim at the horizon, full at the bottom.
pub fn floor_color(config: &RenderConfig, y: u32, screen_h: u32) -> Rgba {
    let half = screen_h as f64 / 2.0;
    let t = if half > 0.0 {
        ((y as f64 + 0.5 - half) / half).clamp(0.0, 1.0)
    } else {
        1.0
    };
    config.floor.shade(0.35 + 0.65 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(perpendicular: f64, side: Side, offset: f64) -> RayHit {
        RayHit {
            distance: perpendicular,
            perpendicular,
            side,
            offset,
            wall: Some(0),
            cell: (0, 0),
        }
    }

    #[test]
    fn brightness_falls_with_distance_and_is_floored() {
        let config = RenderConfig::default();
        let near = distance_brightness(&config, 1.0);
        let far = distance_brightness(&config, 8.0);
        assert!(near > far);
        assert_eq!(distance_brightness(&config, 0.0), 1.0);
        assert_eq!(distance_brightness(&config, 1e9), config.min_brightness);
    }

    #[test]
    fn y_side_and_edges_are_darker() {
        let config = RenderConfig::default();
        let x_mid = shade_wall(&config, &hit(2.0, Side::X, 0.5), 1);
        let y_mid = shade_wall(&config, &hit(2.0, Side::Y, 0.5), 1);
        let x_edge = shade_wall(&config, &hit(2.0, Side::X, 0.01), 1);
        assert!(y_mid.b < x_mid.b);
        assert!(x_edge.b < x_mid.b);
    }

    #[test]
    fn floor_brightens_toward_bottom() {
        let config = RenderConfig::default();
        let horizon = floor_color(&config, 50, 100);
        let bottom = floor_color(&config, 99, 100);
        assert!(bottom.r > horizon.r);
    }

    #[test]
    fn palettes_wrap() {
        assert_eq!(wall_color(0), wall_color(6));
        assert_eq!(sprite_color(SpriteKind(1)), sprite_color(SpriteKind(5)));
    }
}
