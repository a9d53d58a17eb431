//! winit-backed window: event pumping, key mapping, relative mouse motion and
//! presentation through wgpu.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tilecast_engine::Window;
use tilecast_input::{Event, InputError, InputSource, Key, MouseDelta, Subject};
use tilecast_present_wgpu::WgpuPresenter;
use tilecast_render::{PresentError, Presenter};
use tilecast_world::Splash;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, NativeKeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{CursorGrabMode, WindowId};

use crate::splash::load_splash_frame;

/// Pumps before giving up on the platform creating the window.
const CREATE_ATTEMPTS: usize = 100;
/// Event wait while a splash is on screen.
const SPLASH_TICK: Duration = Duration::from_millis(16);

pub fn map_key(key: PhysicalKey) -> Key {
    match key {
        PhysicalKey::Code(KeyCode::KeyW) => Key::W,
        PhysicalKey::Code(KeyCode::KeyA) => Key::A,
        PhysicalKey::Code(KeyCode::KeyS) => Key::S,
        PhysicalKey::Code(KeyCode::KeyD) => Key::D,
        PhysicalKey::Code(KeyCode::Enter | KeyCode::NumpadEnter) => Key::Enter,
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Unidentified(native) => Key::Other(native_code(native)),
        PhysicalKey::Code(_) => Key::Other(0),
    }
}

fn native_code(native: NativeKeyCode) -> u32 {
    match native {
        NativeKeyCode::Android(code) | NativeKeyCode::Xkb(code) => code,
        NativeKeyCode::MacOS(code) | NativeKeyCode::Windows(code) => u32::from(code),
        NativeKeyCode::Unidentified => 0,
    }
}

/// Collects winit callbacks between pumps.
struct Handler {
    title: String,
    size: PhysicalSize<u32>,
    window: Option<Arc<winit::window::Window>>,
    create_error: Option<String>,
    pending: Vec<Event>,
    mouse: MouseDelta,
    resized: Option<PhysicalSize<u32>>,
}

impl Handler {
    fn capture_cursor(window: &winit::window::Window) {
        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(err) = grabbed {
            tracing::warn!(%err, "cursor grab unavailable, mouse look may stop at the window edge");
        }
        window.set_cursor_visible(false);
    }
}

impl ApplicationHandler for Handler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = winit::window::Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.size)
            .with_resizable(true);
        match event_loop.create_window(attrs) {
            Ok(window) => {
                Self::capture_cursor(&window);
                self.window = Some(Arc::new(window));
            }
            Err(err) => self.create_error = Some(err.to_string()),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.pending.push(Event::WindowQuit),
            WindowEvent::Focused(false) => self.pending.push(Event::FocusLost),
            WindowEvent::Resized(size) => self.resized = Some(size),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        ..
                    },
                ..
            } => {
                let key = map_key(physical_key);
                self.pending.push(match state {
                    ElementState::Pressed => Event::KeyDown { key },
                    ElementState::Released => Event::KeyUp { key },
                });
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.mouse.accumulate(delta.0, delta.1);
        }
    }
}

/// Desktop window: winit for events, wgpu for presentation.
pub struct WinitWindow {
    event_loop: EventLoop<()>,
    handler: Handler,
    presenter: Option<WgpuPresenter>,
    frame_size: (u32, u32),
    subject: Subject,
    quit_seen: bool,
}

impl WinitWindow {
    /// Create the event loop. The window itself opens in `init`.
    pub fn new(title: &str, width: u32, height: u32) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new()?;
        Ok(Self {
            event_loop,
            handler: Handler {
                title: title.to_string(),
                size: PhysicalSize::new(width, height),
                window: None,
                create_error: None,
                pending: Vec::new(),
                mouse: MouseDelta::default(),
                resized: None,
            },
            presenter: None,
            frame_size: (width, height),
            subject: Subject::new(),
            quit_seen: false,
        })
    }

    fn pump(&mut self, timeout: Duration) {
        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(timeout), &mut self.handler)
        {
            tracing::debug!(code, "event loop exited");
            self.handler.pending.push(Event::WindowQuit);
        }
        if let Some(size) = self.handler.resized.take() {
            if let Some(presenter) = &mut self.presenter {
                presenter.resize(size.width, size.height);
            }
        }
    }

    fn dispatch(&mut self) -> usize {
        let events = std::mem::take(&mut self.handler.pending);
        for event in &events {
            self.quit_seen |= event.is_quit();
            self.subject.notify(event);
        }
        events.len()
    }
}

impl InputSource for WinitWindow {
    fn init(&mut self) -> Result<(), InputError> {
        for _ in 0..CREATE_ATTEMPTS {
            if self.handler.window.is_some() || self.handler.create_error.is_some() {
                break;
            }
            self.pump(SPLASH_TICK);
        }
        if let Some(err) = self.handler.create_error.take() {
            return Err(InputError::InitFailed(err));
        }
        let Some(window) = self.handler.window.clone() else {
            return Err(InputError::InitFailed("window was never created".into()));
        };

        let size = window.inner_size();
        let presenter = WgpuPresenter::new(window, (size.width, size.height), self.frame_size)
            .map_err(|e| InputError::InitFailed(e.to_string()))?;
        tracing::info!(backend = presenter.backend(), "window ready");
        self.presenter = Some(presenter);
        Ok(())
    }

    fn subject_mut(&mut self) -> &mut Subject {
        &mut self.subject
    }

    fn poll_events(&mut self) -> usize {
        self.pump(Duration::ZERO);
        self.dispatch()
    }

    fn mouse_delta(&mut self) -> MouseDelta {
        self.handler.mouse.take()
    }

    fn cleanup(&mut self) {
        self.presenter = None;
        self.handler.window = None;
        // One more pump lets the platform process the close.
        let _ = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler);
        tracing::debug!("window closed");
    }
}

impl Presenter for WinitWindow {
    fn present(&mut self, pixels: &[u8], row_bytes: usize) -> Result<(), PresentError> {
        match &mut self.presenter {
            Some(presenter) => presenter.present(pixels, row_bytes),
            None => Err(PresentError::SurfaceLost),
        }
    }
}

impl Window for WinitWindow {
    fn flash_image(&mut self, splash: &Splash) -> Result<(), PresentError> {
        let (w, h) = self.frame_size;
        let frame = load_splash_frame(&splash.img_path, w, h)?;
        let deadline = Instant::now() + Duration::from_millis(u64::from(splash.display_ms));

        self.quit_seen = false;
        while Instant::now() < deadline {
            if let Err(err) = frame.present_to(self) {
                tracing::warn!(%err, "splash frame not presented");
            }
            self.pump(SPLASH_TICK);
            self.dispatch();
            if self.quit_seen {
                break;
            }
        }
        // Motion during the splash must not turn the first gameplay frame.
        self.handler.mouse.take();
        Ok(())
    }
}
