//! Built-in demo scene used when no scene file is given.

use std::f64::consts::FRAC_PI_3;
use tilecast_common::{Entity, Player, SpriteKind};

use crate::{Map, Scene, SceneError, Splash};

#[rustfmt::skip]
pub const DEMO_ROWS: [&str; 16] = [
    "0000222222220000",
    "1              0",
    "1      11111   0",
    "1     0        0",
    "0     0  1110000",
    "0     3        0",
    "0   10000      0",
    "0   3   11100  0",
    "5   4   0      0",
    "5   4   1  00000",
    "0       1      0",
    "2       1      0",
    "0       0      0",
    "0 0000000      0",
    "0              0",
    "0002222222200000",
];

/// Relative to the workspace root.
pub const DEMO_SPLASH: &str = "assets/splash_tilecast.png";

/// The 16x16 demo level with four sprites and one intro splash.
pub fn demo_scene() -> Result<Scene, SceneError> {
    let map = Map::from_rows(&DEMO_ROWS)?;
    let player = Player::new(3.456, 2.345, 1.523, FRAC_PI_3);
    let entities = vec![
        Entity::new(3.523, 3.812, SpriteKind(2)),
        Entity::new(1.834, 8.765, SpriteKind(0)),
        Entity::new(5.323, 5.365, SpriteKind(1)),
        Entity::new(4.123, 10.265, SpriteKind(2)),
    ];
    let mut scene = Scene::new(map, player, entities)?;
    scene.load_splash(Splash::new(DEMO_SPLASH, 3000));
    Ok(scene)
}
