use crate::{ObserverHandle, SharedObserver, Subject, SubjectError};

/// Errors raised while bringing up an input source.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("input source failed to initialize: {0}")]
    InitFailed(String),
}

/// Relative pointer motion accumulated since the last read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseDelta {
    pub dx: f64,
    pub dy: f64,
}

impl MouseDelta {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn accumulate(&mut self, dx: f64, dy: f64) {
        self.dx += dx;
        self.dy += dy;
    }

    /// Return the accumulated motion and reset it to zero.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

/// Capability interface for anything that produces [`Event`](crate::Event)s.
///
/// Sources own a [`Subject`] and push every polled event through it
/// synchronously, so the game loop only depends on this trait and a test
/// double can stand in for a real window.
pub trait InputSource {
    fn init(&mut self) -> Result<(), InputError>;

    /// The subject events are dispatched through.
    fn subject_mut(&mut self) -> &mut Subject;

    fn add_observer(&mut self, observer: &SharedObserver) -> Result<ObserverHandle, SubjectError> {
        self.subject_mut().add_observer(observer)
    }

    fn remove_observer(&mut self, handle: ObserverHandle) -> Result<(), SubjectError> {
        self.subject_mut().remove_observer(handle)
    }

    /// Drain pending events and push each one to the observers.
    /// Never blocks waiting for new input. Returns the number of events.
    fn poll_events(&mut self) -> usize;

    /// Pointer motion since the previous call. Reading resets the counter.
    fn mouse_delta(&mut self) -> MouseDelta;

    fn cleanup(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_resets_delta() {
        let mut d = MouseDelta::default();
        d.accumulate(3.0, -1.0);
        d.accumulate(2.0, 0.5);
        assert_eq!(d.take(), MouseDelta::new(5.0, -0.5));
        assert_eq!(d, MouseDelta::default());
    }
}
