use tilecast_world::Scene;

use crate::raycast::{RayHit, cast_ray, column_angle, projected_height};
use crate::shading::{floor_color, shade_wall};
use crate::sprites::{draw_sprites, project_sprites};
use crate::{FrameBuffer, RenderConfig};

/// Errors from building a renderer or wrapping pixel data.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("output must be at least 1x1, got {width}x{height}")]
    ZeroSize { width: u32, height: u32 },
    #[error("max ray length must be finite and positive, got {0}")]
    InvalidMaxRayLength(f64),
    #[error("pixel buffer holds {found} bytes, expected {expected}")]
    BufferSize { expected: usize, found: usize },
}

/// Renderer interface used by the game loop.
///
/// The renderer borrows the scene read-only for one call and returns a view
/// of its own framebuffer, valid until the next call.
pub trait Renderer {
    fn init(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    /// Render one frame from the given scene.
    fn render(&mut self, scene: &Scene) -> &FrameBuffer;

    fn cleanup(&mut self) {}
}

/// Software raycaster: one ray per column, then depth-tested sprites.
#[derive(Debug)]
pub struct RaycastRenderer {
    config: RenderConfig,
    frame: FrameBuffer,
    depth: Vec<f64>,
    hits: Vec<RayHit>,
}

impl RaycastRenderer {
    pub fn new(config: RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let frame = FrameBuffer::new(config.width, config.height);
        let columns = config.width as usize;
        Ok(Self {
            config,
            frame,
            depth: vec![0.0; columns],
            hits: Vec::with_capacity(columns),
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The last rendered frame.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Perpendicular wall distance per column from the last frame, in cells.
    pub fn column_depths(&self) -> &[f64] {
        &self.depth
    }

    /// Ray hit per column from the last frame.
    pub fn last_hits(&self) -> &[RayHit] {
        &self.hits
    }

    fn wall_pass(&mut self, scene: &Scene) {
        let (w, h) = (self.config.width, self.config.height);
        let player = &scene.player;
        let origin = scene.map.to_cell_space(player.position());
        let screen_h = h as f64;

        self.hits.clear();
        for c in 0..w {
            let angle = column_angle(player.angle, player.fov, c, w);
            let hit = cast_ray(
                &scene.map,
                origin,
                angle,
                player.angle,
                self.config.max_ray_length,
            );

            let (top, bottom) = match hit.wall {
                Some(wall_type) => {
                    let strip = projected_height(h, hit.perpendicular).min(screen_h);
                    let top = ((screen_h - strip) / 2.0).round().max(0.0) as u32;
                    let bottom = (top + strip.round() as u32).min(h);
                    let color = shade_wall(&self.config, &hit, wall_type);
                    self.frame.fill_column(c, top, bottom, color);
                    (top, bottom)
                }
                None => (h / 2, h / 2),
            };

            self.frame.fill_column(c, 0, top, self.config.ceiling);
            for y in bottom..h {
                self.frame.set(c, y, floor_color(&self.config, y, h));
            }

            self.depth[c as usize] = hit.perpendicular;
            self.hits.push(hit);
        }
    }
}

impl Renderer for RaycastRenderer {
    fn init(&mut self) -> Result<(), RenderError> {
        tracing::info!(
            width = self.config.width,
            height = self.config.height,
            max_ray_length = self.config.max_ray_length,
            "raycast renderer initialized"
        );
        Ok(())
    }

    fn render(&mut self, scene: &Scene) -> &FrameBuffer {
        let _span = tracing::trace_span!("render_frame").entered();

        self.depth.fill(f64::INFINITY);
        self.wall_pass(scene);

        let sprites = project_sprites(scene, self.config.width, self.config.height);
        draw_sprites(&mut self.frame, &self.depth, &sprites, &self.config);

        tracing::trace!(
            columns = self.config.width,
            sprites = sprites.len(),
            "frame rendered"
        );
        &self.frame
    }

    fn cleanup(&mut self) {
        tracing::debug!("raycast renderer cleaned up");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_3;
    use tilecast_common::{Entity, Player, SpriteKind};
    use tilecast_world::Map;
    use tilecast_world::demo::demo_scene;

    use crate::shading::{distance_brightness, sprite_color};

    fn renderer(w: u32, h: u32) -> RaycastRenderer {
        RaycastRenderer::new(RenderConfig::with_size(w, h)).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        assert!(RaycastRenderer::new(RenderConfig::with_size(0, 0)).is_err());
    }

    #[test]
    fn single_column_reports_half_cell_to_east_wall() {
        let scene = Scene::new(
            Map::bordered(3, 3).unwrap(),
            Player::new(1.5, 1.5, 0.0, FRAC_PI_3),
            Vec::new(),
        )
        .unwrap();
        let mut r = renderer(1, 40);
        r.render(&scene);
        assert!((r.column_depths()[0] - 0.5).abs() < 1e-9);
        assert_eq!(r.last_hits()[0].cell.0, 2);
    }

    #[test]
    fn near_walls_fill_the_column() {
        let scene = Scene::new(
            Map::bordered(3, 3).unwrap(),
            Player::new(1.5, 1.5, 0.0, FRAC_PI_3),
            Vec::new(),
        )
        .unwrap();
        let mut r = renderer(1, 40);
        let frame = r.render(&scene);
        let column = frame.column(0);
        let cfg = RenderConfig::default();
        assert!(column.iter().all(|&p| p != cfg.ceiling));
    }

    #[test]
    fn wall_height_follows_inverse_distance() {
        let rows = ["0000000000", "0        0", "0000000000"];
        let map = Map::from_rows(&rows).unwrap();
        let strip = |x: f64| {
            let scene =
                Scene::new(map.clone(), Player::new(x, 1.5, 0.0, FRAC_PI_3), Vec::new()).unwrap();
            let mut r = renderer(2, 120);
            r.render(&scene);
            // Column 1 looks straight down the corridor.
            let hit = r.last_hits()[1];
            let color = shade_wall(r.config(), &hit, hit.wall.unwrap());
            r.frame().column(1).iter().filter(|&&p| p == color).count()
        };
        // Distances 8 and 4 to the east face at x = 9.
        assert_eq!(strip(1.0), 15);
        assert_eq!(strip(5.0), 30);
    }

    /// A 13x9 room split by a full-height wall at x = 6; the player stands at
    /// x = 1 so the wall face is exactly 5 cells away for every column.
    fn split_room(entities: Vec<Entity>) -> Scene {
        let mut rows = vec!["0000000000000".to_string()];
        for _ in 0..7 {
            rows.push("0     0     0".to_string());
        }
        rows.push("0000000000000".to_string());
        let map = Map::from_rows(&rows).unwrap();
        Scene::new(map, Player::new(1.0, 4.5, 0.0, FRAC_PI_3), entities).unwrap()
    }

    #[test]
    fn split_room_depth_is_five_everywhere() {
        let mut r = renderer(8, 8);
        r.render(&split_room(Vec::new()));
        for d in r.column_depths() {
            assert!((d - 5.0).abs() < 1e-9, "depth {d}");
        }
    }

    #[test]
    fn sprite_in_front_of_wall_contributes() {
        let near = Entity::new(3.0, 4.5, SpriteKind(1));
        let mut r = renderer(8, 8);
        let frame = r.render(&split_room(vec![near]));
        let cfg = RenderConfig::default();
        let color = sprite_color(SpriteKind(1)).shade(distance_brightness(&cfg, 2.0));
        // Depth 2 in an 8x8 view: a 4x4 block centered on column 4.
        for x in 2..6 {
            for y in 2..6 {
                assert_eq!(frame.pixel(x, y), Some(color), "pixel {x},{y}");
            }
        }
        assert_ne!(frame.pixel(1, 4), Some(color));
        assert_ne!(frame.pixel(6, 4), Some(color));
    }

    #[test]
    fn sprite_behind_wall_is_occluded() {
        let far = Entity::new(11.0, 4.5, SpriteKind(1));
        let mut with_sprite = renderer(8, 8);
        let mut without = renderer(8, 8);
        let a = with_sprite.render(&split_room(vec![far])).clone();
        let b = without.render(&split_room(Vec::new())).clone();
        assert_eq!(a, b);
    }

    #[test]
    fn equal_depth_later_entity_wins_deterministically() {
        let first = Entity::new(3.0, 4.5, SpriteKind(0));
        let second = Entity::new(3.0, 4.5, SpriteKind(2));
        let scene = split_room(vec![first, second]);
        let cfg = RenderConfig::default();
        let expected = sprite_color(SpriteKind(2)).shade(distance_brightness(&cfg, 2.0));

        let mut r = renderer(8, 8);
        let once = r.render(&scene).clone();
        assert_eq!(once.pixel(4, 4), Some(expected));
        for _ in 0..5 {
            assert_eq!(r.render(&scene), &once);
        }
    }

    #[test]
    fn frames_are_fully_overwritten() {
        let demo = demo_scene().unwrap();
        let room = split_room(vec![Entity::new(3.0, 4.5, SpriteKind(3))]);

        let mut reused = renderer(64, 48);
        reused.render(&demo);
        let second = reused.render(&room).clone();

        let mut fresh = renderer(64, 48);
        assert_eq!(fresh.render(&room), &second);
    }

    #[test]
    fn open_grid_still_paints_every_pixel() {
        let map = Map::from_rows(&["     ", "     ", "     "]).unwrap();
        let scene = Scene::new(map, Player::new(2.5, 1.5, 0.4, FRAC_PI_3), Vec::new()).unwrap();
        let mut r = renderer(32, 24);
        r.render(&scene);
        assert!(r.last_hits().iter().all(|h| h.wall.is_some()));
        assert!(r.column_depths().iter().all(|d| d.is_finite() && *d > 0.0));
    }

    #[test]
    fn player_inside_wall_clamps_to_full_height() {
        let scene = Scene::new(
            Map::bordered(3, 3).unwrap(),
            Player::new(0.5, 0.5, 0.0, FRAC_PI_3),
            Vec::new(),
        )
        .unwrap();
        let mut r = renderer(4, 10);
        let frame = r.render(&scene).clone();
        let cfg = RenderConfig::default();
        for x in 0..4 {
            assert!(frame.column(x).iter().all(|&p| p != cfg.ceiling));
        }
    }
}
