//! Deterministic input source that replays prepared event batches.

use std::collections::VecDeque;

use crate::{Event, InputError, InputSource, MouseDelta, Subject};

/// One poll's worth of scripted input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptedFrame {
    pub events: Vec<Event>,
    pub mouse: MouseDelta,
}

/// Input source fed from a script instead of a device.
///
/// Each call to [`poll_events`](InputSource::poll_events) pops one frame and
/// dispatches its events; the frame's mouse motion becomes the next
/// [`mouse_delta`](InputSource::mouse_delta). An exhausted script polls
/// nothing.
#[derive(Default)]
pub struct ScriptedInput {
    subject: Subject,
    frames: VecDeque<ScriptedFrame>,
    pending_mouse: MouseDelta,
    fail_init: Option<String>,
    initialized: bool,
    cleaned_up: bool,
    polls: usize,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a frame of events with no mouse motion.
    pub fn push_events(&mut self, events: impl IntoIterator<Item = Event>) -> &mut Self {
        self.frames.push_back(ScriptedFrame {
            events: events.into_iter().collect(),
            mouse: MouseDelta::default(),
        });
        self
    }

    /// Queue a frame with only mouse motion.
    pub fn push_mouse(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.frames.push_back(ScriptedFrame {
            events: Vec::new(),
            mouse: MouseDelta::new(dx, dy),
        });
        self
    }

    pub fn push_frame(&mut self, frame: ScriptedFrame) -> &mut Self {
        self.frames.push_back(frame);
        self
    }

    /// Make `init` fail with the given reason.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            fail_init: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    pub fn polls(&self) -> usize {
        self.polls
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_cleaned_up(&self) -> bool {
        self.cleaned_up
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }
}

impl InputSource for ScriptedInput {
    fn init(&mut self) -> Result<(), InputError> {
        if let Some(reason) = &self.fail_init {
            return Err(InputError::InitFailed(reason.clone()));
        }
        self.initialized = true;
        tracing::debug!(frames = self.frames.len(), "scripted input ready");
        Ok(())
    }

    fn subject_mut(&mut self) -> &mut Subject {
        &mut self.subject
    }

    fn poll_events(&mut self) -> usize {
        self.polls += 1;
        let Some(frame) = self.frames.pop_front() else {
            return 0;
        };
        self.pending_mouse.accumulate(frame.mouse.dx, frame.mouse.dy);
        for event in &frame.events {
            self.subject.notify(event);
        }
        frame.events.len()
    }

    fn mouse_delta(&mut self) -> MouseDelta {
        self.pending_mouse.take()
    }

    fn cleanup(&mut self) {
        self.cleaned_up = true;
    }
}
