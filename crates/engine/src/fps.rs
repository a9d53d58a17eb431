//! Frame-rate diagnostics. Nothing here paces or scales the simulation.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source, as an offset from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-advanced clock. Clones share the same time, so a test can keep one
/// handle while the loop owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Counts frames per reporting window.
///
/// Call [`tick`](Self::tick) once per frame. When at least `window` has
/// passed since the last reset it returns the frames counted so far and
/// starts a new window.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: Duration,
    window_start: Duration,
    frames: u32,
    last: Option<u32>,
}

impl FpsCounter {
    pub const DEFAULT_WINDOW: Duration = Duration::from_millis(1000);

    pub fn new(start: Duration) -> Self {
        Self::with_window(start, Self::DEFAULT_WINDOW)
    }

    pub fn with_window(start: Duration, window: Duration) -> Self {
        Self {
            window,
            window_start: start,
            frames: 0,
            last: None,
        }
    }

    pub fn tick(&mut self, now: Duration) -> Option<u32> {
        let mut report = None;
        if now.saturating_sub(self.window_start) >= self.window {
            report = Some(self.frames);
            self.last = report;
            self.frames = 0;
            self.window_start = now;
        }
        self.frames += 1;
        report
    }

    /// The most recent report, if a window has completed.
    pub fn last_fps(&self) -> Option<u32> {
        self.last
    }
}

/// Rolling window of recent frame times.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    samples: Vec<Duration>,
    next: usize,
    len: usize,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: vec![Duration::ZERO; capacity.max(1)],
            next: 0,
            len: 0,
        }
    }

    pub fn record(&mut self, frame_time: Duration) {
        let cap = self.samples.len();
        self.samples[self.next] = frame_time;
        self.next = (self.next + 1) % cap;
        self.len = (self.len + 1).min(cap);
    }

    fn recorded(&self) -> &[Duration] {
        &self.samples[..self.len]
    }

    pub fn count(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn average(&self) -> Duration {
        if self.len == 0 {
            return Duration::ZERO;
        }
        self.recorded().iter().sum::<Duration>() / self.len as u32
    }

    pub fn max(&self) -> Duration {
        self.recorded().iter().copied().max().unwrap_or_default()
    }

    pub fn min(&self) -> Duration {
        self.recorded().iter().copied().min().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fps_reports_after_full_window() {
        let mut fps = FpsCounter::new(ms(0));
        for t in [0, 200, 400, 600, 800] {
            assert_eq!(fps.tick(ms(t)), None);
        }
        assert_eq!(fps.tick(ms(999)), None);
        assert_eq!(fps.tick(ms(1000)), Some(6));
        assert_eq!(fps.last_fps(), Some(6));
        // The reporting frame counts toward the next window.
        assert_eq!(fps.tick(ms(1500)), None);
        assert_eq!(fps.tick(ms(2100)), Some(2));
    }

    #[test]
    fn long_stall_reports_once() {
        let mut fps = FpsCounter::new(ms(0));
        fps.tick(ms(0));
        assert_eq!(fps.tick(ms(5000)), Some(1));
        assert_eq!(fps.tick(ms(5001)), None);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(ms(30));
        assert_eq!(clock.now(), ms(30));
        handle.set(ms(5));
        assert_eq!(clock.now(), ms(5));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn frame_timer_statistics() {
        let mut timer = FrameTimer::new(4);
        assert!(timer.is_empty());
        assert_eq!(timer.average(), Duration::ZERO);
        for t in [10, 20, 30] {
            timer.record(ms(t));
        }
        assert_eq!(timer.count(), 3);
        assert_eq!(timer.average(), ms(20));
        assert_eq!(timer.min(), ms(10));
        assert_eq!(timer.max(), ms(30));
    }

    #[test]
    fn frame_timer_keeps_most_recent_samples() {
        let mut timer = FrameTimer::new(2);
        for t in [10, 20, 30] {
            timer.record(ms(t));
        }
        assert_eq!(timer.count(), 2);
        assert_eq!(timer.average(), ms(25));
        assert_eq!(timer.min(), ms(20));
    }
}
