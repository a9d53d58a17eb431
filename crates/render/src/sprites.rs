//! Sprite projection and depth-tested compositing.

use std::f64::consts::{PI, TAU};

use tilecast_common::SpriteKind;
use tilecast_world::Scene;

use crate::framebuffer::FrameBuffer;
use crate::shading::{distance_brightness, sprite_color};
use crate::RenderConfig;

/// Sprites closer than this along the view axis are skipped.
const MIN_SPRITE_DEPTH: f64 = 1e-6;

/// Screen-space footprint of one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteProjection {
    /// Index into the scene's entity sequence.
    pub index: usize,
    pub kind: SpriteKind,
    /// Perpendicular distance in cells, comparable with the wall depth buffer.
    pub depth: f64,
    /// Horizontal center in columns.
    pub center_x: f64,
    /// Edge length in pixels.
    pub size: f64,
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
}

/// Wrap an angle into `[-PI, PI)`.
fn wrap_angle(a: f64) -> f64 {
    (a + PI).rem_euclid(TAU) - PI
}

/// Project every visible entity into screen space, sorted back to front.
///
/// Entities behind or coincident with the player, or whose footprint lies
/// entirely outside the screen, are dropped. Ties in depth keep scene order
/// so the later entity is drawn last.
pub fn project_sprites(scene: &Scene, width: u32, height: u32) -> Vec<SpriteProjection> {
    let player = &scene.player;
    let origin = scene.map.to_cell_space(player.position());
    let forward = player.forward();
    let (w, h) = (width as f64, height as f64);

    let mut out: Vec<SpriteProjection> = scene
        .entities
        .iter()
        .enumerate()
        .filter_map(|(index, entity)| {
            let rel = scene.map.to_cell_space(entity.position()) - origin;
            let depth = rel.dot(forward);
            if !(depth > MIN_SPRITE_DEPTH) {
                return None;
            }

            let view_angle = wrap_angle(rel.y.atan2(rel.x) - player.angle);
            let center_x = (view_angle + player.fov / 2.0) / player.fov * w;
            let size = h / depth;
            let elevation = entity.z / scene.map.cell_size() * size;

            let left = (center_x - size / 2.0).round() as i64;
            let right = left + size.round().max(1.0) as i64;
            let top = (h / 2.0 - size / 2.0 - elevation).round() as i64;
            let bottom = top + size.round().max(1.0) as i64;

            if right <= 0 || left >= width as i64 {
                return None;
            }

            Some(SpriteProjection {
                index,
                kind: entity.kind,
                depth,
                center_x,
                size,
                left,
                right,
                top,
                bottom,
            })
        })
        .collect();

    // Stable sort: equal depths keep insertion order.
    out.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    out
}

/// Draw projected sprites in order, column by column, skipping any column
/// whose wall is nearer than the sprite.
pub(crate) fn draw_sprites(
    fb: &mut FrameBuffer,
    depth_buffer: &[f64],
    sprites: &[SpriteProjection],
    config: &RenderConfig,
) {
    let (w, h) = (fb.width() as i64, fb.height() as i64);
    for sprite in sprites {
        let color = sprite_color(sprite.kind).shade(distance_brightness(config, sprite.depth));
        let y0 = sprite.top.clamp(0, h) as u32;
        let y1 = sprite.bottom.clamp(0, h) as u32;
        for col in sprite.left.max(0)..sprite.right.min(w) {
            if sprite.depth < depth_buffer[col as usize] {
                fb.fill_column(col as u32, y0, y1, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_3;
    use tilecast_common::{Entity, Player};
    use tilecast_world::Map;

    fn scene_with(player: Player, entities: Vec<Entity>) -> Scene {
        Scene::new(Map::bordered(20, 20).unwrap(), player, entities).unwrap()
    }

    #[test]
    fn entity_dead_ahead_projects_to_center() {
        let scene = scene_with(
            Player::new(2.0, 10.0, 0.0, FRAC_PI_3),
            vec![Entity::new(6.0, 10.0, SpriteKind(1))],
        );
        let sprites = project_sprites(&scene, 100, 80);
        assert_eq!(sprites.len(), 1);
        let s = sprites[0];
        assert!((s.depth - 4.0).abs() < 1e-12);
        assert!((s.center_x - 50.0).abs() < 1e-9);
        assert!((s.size - 20.0).abs() < 1e-12);
        assert_eq!((s.left, s.right), (40, 60));
        assert_eq!((s.top, s.bottom), (30, 50));
    }

    #[test]
    fn entities_behind_or_coincident_are_dropped() {
        let scene = scene_with(
            Player::new(10.0, 10.0, 0.0, FRAC_PI_3),
            vec![
                Entity::new(7.0, 10.0, SpriteKind(0)),
                Entity::new(10.0, 10.0, SpriteKind(0)),
                Entity::new(10.0, 12.0, SpriteKind(0)),
            ],
        );
        assert!(project_sprites(&scene, 64, 48).is_empty());
    }

    #[test]
    fn entities_outside_fov_are_dropped() {
        // 60 degree fov: an entity 45 degrees off axis is off screen.
        let scene = scene_with(
            Player::new(5.0, 5.0, 0.0, FRAC_PI_3),
            vec![Entity::new(15.0, 15.0, SpriteKind(0))],
        );
        assert!(project_sprites(&scene, 64, 48).is_empty());
    }

    #[test]
    fn sorted_back_to_front_with_stable_ties() {
        let scene = scene_with(
            Player::new(2.0, 10.0, 0.0, FRAC_PI_3),
            vec![
                Entity::new(4.0, 10.0, SpriteKind(0)),
                Entity::new(8.0, 10.0, SpriteKind(1)),
                Entity::new(6.0, 10.0, SpriteKind(2)),
                Entity::new(6.0, 10.0, SpriteKind(3)),
            ],
        );
        let order: Vec<usize> = project_sprites(&scene, 64, 48)
            .iter()
            .map(|s| s.index)
            .collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn elevation_shifts_sprite_up() {
        let mut raised = Entity::new(6.0, 10.0, SpriteKind(0));
        raised.z = 0.5;
        let scene = scene_with(
            Player::new(2.0, 10.0, 0.0, FRAC_PI_3),
            vec![Entity::new(6.0, 10.0, SpriteKind(0)), raised],
        );
        let sprites = project_sprites(&scene, 100, 80);
        let ground = sprites.iter().find(|s| s.index == 0).unwrap();
        let air = sprites.iter().find(|s| s.index == 1).unwrap();
        assert_eq!(ground.top - air.top, 10);
    }

    #[test]
    fn wrap_angle_range() {
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((wrap_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-12);
        assert!((wrap_angle(0.25) - 0.25).abs() < 1e-12);
    }
}
