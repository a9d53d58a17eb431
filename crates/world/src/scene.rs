use serde::{Deserialize, Serialize};
use tilecast_common::{Entity, Player};

use crate::{Map, SceneError};

/// A timed intro image shown before gameplay activates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Splash {
    pub img_path: String,
    pub display_ms: u32,
}

impl Splash {
    pub fn new(img_path: impl Into<String>, display_ms: u32) -> Self {
        Self {
            img_path: img_path.into(),
            display_ms,
        }
    }
}

/// Everything the renderer reads for one frame.
///
/// Entity order is insertion order. It carries no rendering meaning beyond
/// breaking ties between sprites at equal distance.
#[derive(Debug, Clone)]
pub struct Scene {
    pub map: Map,
    pub player: Player,
    pub entities: Vec<Entity>,
    pub splash_images: Vec<Splash>,
    activated: bool,
}

impl Scene {
    /// Validate and assemble a scene.
    pub fn new(map: Map, player: Player, entities: Vec<Entity>) -> Result<Self, SceneError> {
        if !(player.fov > 0.0 && player.fov < std::f64::consts::PI) {
            return Err(SceneError::InvalidFov(player.fov));
        }
        if !(player.x.is_finite() && player.y.is_finite() && player.angle.is_finite()) {
            return Err(SceneError::NonFinite("player".into()));
        }
        for (i, e) in entities.iter().enumerate() {
            if !(e.x.is_finite() && e.y.is_finite() && e.z.is_finite() && e.angle.is_finite()) {
                return Err(SceneError::NonFinite(format!("entity {i}")));
            }
        }

        tracing::debug!(
            width = map.width(),
            height = map.height(),
            entities = entities.len(),
            "scene assembled"
        );

        Ok(Self {
            map,
            player,
            entities,
            splash_images: Vec::new(),
            activated: false,
        })
    }

    /// Queue a splash image to play before gameplay.
    pub fn load_splash(&mut self, splash: Splash) {
        self.splash_images.push(splash);
    }

    /// Whether the intro sequence has already been played.
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn activate(&mut self) {
        self.activated = true;
    }

    /// Append an entity at the end of the draw-tie order.
    pub fn spawn(&mut self, entity: Entity) -> usize {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    /// Whether the player stands inside an empty cell.
    pub fn player_in_open_cell(&self) -> bool {
        let (cx, cy) = self.map.cell_at(self.player.position());
        !self.map.is_wall(cx, cy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_3;
    use tilecast_common::SpriteKind;

    fn room() -> Map {
        Map::bordered(3, 3).unwrap()
    }

    #[test]
    fn new_scene_is_not_activated() {
        let scene = Scene::new(room(), Player::new(1.5, 1.5, 0.0, FRAC_PI_3), Vec::new()).unwrap();
        assert!(!scene.is_activated());
        assert!(scene.splash_images.is_empty());
        assert!(scene.player_in_open_cell());
    }

    #[test]
    fn fov_must_be_in_open_range() {
        for fov in [0.0, -1.0, std::f64::consts::PI, 4.0, f64::NAN] {
            let err = Scene::new(room(), Player::new(1.5, 1.5, 0.0, fov), Vec::new()).unwrap_err();
            assert!(matches!(err, SceneError::InvalidFov(_)), "fov {fov}");
        }
    }

    #[test]
    fn non_finite_positions_are_rejected() {
        let err = Scene::new(room(), Player::new(f64::INFINITY, 1.5, 0.0, FRAC_PI_3), Vec::new())
            .unwrap_err();
        assert!(matches!(err, SceneError::NonFinite(_)));

        let bad = Entity::new(f64::NAN, 1.0, SpriteKind(0));
        let err = Scene::new(room(), Player::new(1.5, 1.5, 0.0, FRAC_PI_3), vec![bad]).unwrap_err();
        assert!(err.to_string().contains("entity 0"));
    }

    #[test]
    fn splashes_queue_in_order_and_activation_sticks() {
        let mut scene = Scene::new(room(), Player::new(1.5, 1.5, 0.0, FRAC_PI_3), Vec::new()).unwrap();
        scene.load_splash(Splash::new("a.png", 100));
        scene.load_splash(Splash::new("b.png", 200));
        assert_eq!(scene.splash_images[0].img_path, "a.png");
        assert_eq!(scene.splash_images[1].display_ms, 200);
        scene.activate();
        assert!(scene.is_activated());
    }

    #[test]
    fn spawn_appends_in_insertion_order() {
        let mut scene = Scene::new(room(), Player::new(1.5, 1.5, 0.0, FRAC_PI_3), Vec::new()).unwrap();
        let a = scene.spawn(Entity::new(1.2, 1.2, SpriteKind(1)));
        let b = scene.spawn(Entity::new(1.8, 1.8, SpriteKind(2)));
        assert_eq!((a, b), (0, 1));
        assert_eq!(scene.entities[1].kind, SpriteKind(2));
    }
}
