use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tilecast_input::{InputError, ObserverHandle, SharedObserver, SubjectError};
use tilecast_render::{RenderError, Renderer};
use tilecast_world::Scene;

use crate::fps::{Clock, FpsCounter, FrameTimer, SystemClock};
use crate::{ControlConfig, Controller, Window};

/// Frame-time samples kept for each FPS report.
const FRAME_HISTORY: usize = 120;

/// Startup failures. Any of these aborts the run before the first frame.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("renderer initialization failed: {0}")]
    Render(#[from] RenderError),
    #[error("observer registration failed: {0}")]
    Observer(#[from] SubjectError),
    #[error("window initialization failed: {0}")]
    Window(#[from] InputError),
}

/// The game loop.
///
/// Owns the window, the renderer and (through its [`Controller`]) the one
/// live scene. Each iteration polls input, applies the per-frame update,
/// renders, presents and counts the frame.
pub struct App<W: Window, R: Renderer> {
    name: String,
    window: W,
    renderer: R,
    controller: Rc<RefCell<Controller>>,
    observer: Option<ObserverHandle>,
    clock: Box<dyn Clock>,
    fps: FpsCounter,
    timer: FrameTimer,
    /// Clock reading at the start of the previous gameplay frame.
    last_tick: Option<Duration>,
    frame_count: u64,
    frame_limit: Option<u64>,
    initialized: bool,
}

impl<W: Window, R: Renderer> App<W, R> {
    pub fn new(name: impl Into<String>, window: W, renderer: R, scene: Scene) -> Self {
        Self {
            name: name.into(),
            window,
            renderer,
            controller: Rc::new(RefCell::new(Controller::new(scene, ControlConfig::default()))),
            observer: None,
            clock: Box::new(SystemClock::new()),
            fps: FpsCounter::new(Duration::ZERO),
            timer: FrameTimer::new(FRAME_HISTORY),
            last_tick: None,
            frame_count: 0,
            frame_limit: None,
            initialized: false,
        }
    }

    pub fn with_controls(self, config: ControlConfig) -> Self {
        self.controller.borrow_mut().set_config(config);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Stop after `frames` iterations even if no quit arrives.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    pub fn controller(&self) -> Ref<'_, Controller> {
        self.controller.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.controller.borrow().is_running()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn frame_timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Frames counted in the last completed FPS window.
    pub fn last_fps(&self) -> Option<u32> {
        self.fps.last_fps()
    }

    /// Bring up the renderer, register the controller, then the window.
    ///
    /// On failure everything already started is released again (renderer,
    /// then observer) and the window is left untouched.
    pub fn init(&mut self) -> Result<(), AppError> {
        self.renderer.init()?;
        tracing::debug!("renderer initialized");

        let observer: SharedObserver = self.controller.clone();
        match self.window.add_observer(&observer) {
            Ok(handle) => self.observer = Some(handle),
            Err(err) => {
                self.renderer.cleanup();
                return Err(err.into());
            }
        }
        tracing::debug!("controller registered");

        if let Err(err) = self.window.init() {
            self.renderer.cleanup();
            self.release_observer();
            return Err(err.into());
        }

        self.initialized = true;
        tracing::info!(app = %self.name, "initialized");
        Ok(())
    }

    /// Show every queued splash once, then activate the scene.
    pub fn play_splashes(&mut self) {
        let splashes = {
            let controller = self.controller.borrow();
            if controller.scene().is_activated() {
                return;
            }
            controller.scene().splash_images.clone()
        };
        for splash in &splashes {
            if !self.is_running() {
                break;
            }
            tracing::info!(path = %splash.img_path, display_ms = splash.display_ms, "showing splash");
            if let Err(err) = self.window.flash_image(splash) {
                tracing::warn!(path = %splash.img_path, %err, "splash failed");
            }
        }
        self.controller.borrow_mut().scene_mut().activate();
    }

    /// One iteration: poll, update, render, present, count.
    pub fn run_frame(&mut self) {
        let _span = tracing::info_span!("app_frame", frame = self.frame_count).entered();

        // Timing starts at the first gameplay frame. Startup and splash time
        // is never measured.
        let now = self.clock.now();
        let elapsed = match self.last_tick.replace(now) {
            Some(prev) => Some(now.saturating_sub(prev)),
            None => {
                self.fps = FpsCounter::new(now);
                None
            }
        };
        if let Some(fps) = self.fps.tick(now) {
            tracing::info!(
                fps,
                avg_ms = self.timer.average().as_secs_f64() * 1000.0,
                max_ms = self.timer.max().as_secs_f64() * 1000.0,
                "frame rate"
            );
        }

        let events = self.window.poll_events();
        let mouse = self.window.mouse_delta();
        self.controller.borrow_mut().on_update(mouse, elapsed);

        let controller = self.controller.borrow();
        let frame = self.renderer.render(controller.scene());
        if let Err(err) = frame.present_to(&mut self.window) {
            tracing::warn!(%err, frame = self.frame_count, "present failed, frame skipped");
        }
        drop(controller);

        self.timer.record(self.clock.now().saturating_sub(now));
        self.frame_count += 1;
        tracing::trace!(events, frame = self.frame_count, "frame done");
    }

    /// Release everything in shutdown order: renderer, observer, window.
    pub fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }
        self.renderer.cleanup();
        self.release_observer();
        self.window.cleanup();
        self.initialized = false;
        tracing::info!(app = %self.name, frames = self.frame_count, "shut down");
    }

    /// Run to completion. Returns 0 on a normal exit and -1 if startup failed.
    pub fn run(&mut self) -> i32 {
        if let Err(err) = self.init() {
            tracing::error!(app = %self.name, %err, "startup failed");
            return -1;
        }
        self.play_splashes();
        while self.is_running() {
            if self.frame_limit.is_some_and(|limit| self.frame_count >= limit) {
                tracing::debug!(frames = self.frame_count, "frame limit reached");
                break;
            }
            self.run_frame();
        }
        self.shutdown();
        0
    }

    fn release_observer(&mut self) {
        if let Some(handle) = self.observer.take() {
            if let Err(err) = self.window.remove_observer(handle) {
                tracing::warn!(%err, "controller deregistration failed");
            }
        }
    }
}
