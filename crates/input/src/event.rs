/// Keys the application distinguishes. Everything else maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Enter,
    Escape,
    /// Platform scan code of an unmapped key.
    Other(u32),
}

/// A transient input event, consumed synchronously by observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The window was asked to close.
    WindowQuit,
    KeyDown { key: Key },
    KeyUp { key: Key },
    /// Relative pointer motion since the previous event.
    MouseMove { dx: f64, dy: f64 },
    /// The window lost input focus.
    FocusLost,
}

impl Event {
    pub fn key_down(key: Key) -> Self {
        Self::KeyDown { key }
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, Self::WindowQuit)
    }
}
