use std::time::Duration;

use tilecast_input::{Event, Key, MouseDelta, Observer};
use tilecast_world::Scene;

use crate::{ControlConfig, StrafeMode};

/// Owns the live scene and the running flag; mutated by input events.
///
/// Registered with the input source as an observer. Key events move the
/// player immediately; mouse turning is applied once per frame through
/// [`on_update`](Self::on_update).
#[derive(Debug)]
pub struct Controller {
    scene: Scene,
    running: bool,
    config: ControlConfig,
}

impl Controller {
    pub fn new(scene: Scene, config: ControlConfig) -> Self {
        Self {
            scene,
            running: true,
            config,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn set_config(&mut self, config: ControlConfig) {
        self.config = config;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Continuous per-frame update: accumulate view angle from the
    /// horizontal mouse delta. `elapsed` is the time since the previous
    /// frame, or `None` when there is none.
    pub fn on_update(&mut self, mouse: MouseDelta, elapsed: Option<Duration>) {
        let factor = self.config.movement_timing.factor(elapsed);
        self.scene.player.angle += mouse.dx * self.config.turn_scale * factor;
    }

    fn on_key(&mut self, key: Key) {
        let step = self.config.strafe_step;
        let player = &mut self.scene.player;
        match key {
            Key::W => player.advance(self.config.move_step),
            Key::S => player.advance(-self.config.move_step),
            Key::A | Key::D => {
                let sign = if key == Key::A { 1.0 } else { -1.0 };
                match self.config.strafe_mode {
                    StrafeMode::Fixed => player.y += sign * step,
                    StrafeMode::Perpendicular => {
                        let delta = player.right() * (-sign * step);
                        player.x += delta.x;
                        player.y += delta.y;
                    }
                }
            }
            Key::Enter | Key::Escape => tracing::trace!(?key, "reserved key"),
            Key::Other(_) => {}
        }
    }
}

impl Observer for Controller {
    fn on_notify(&mut self, event: &Event) {
        match *event {
            Event::WindowQuit => {
                tracing::info!("quit requested");
                self.running = false;
            }
            Event::KeyDown { key } => self.on_key(key),
            Event::KeyUp { .. } | Event::MouseMove { .. } | Event::FocusLost => {}
        }
    }
}
