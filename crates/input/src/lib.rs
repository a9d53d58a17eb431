//! Input: typed events, synchronous observer dispatch, input-source seam.
//!
//! # Invariants
//! - Observers are notified in registration order, once per event.
//! - Dispatch is push-based and synchronous; there is no queue between the
//!   source and its observers.
//! - Duplicate registration and unknown handles are rejected with an error,
//!   never silently double-notified.

pub mod event;
pub mod scripted;
pub mod source;
pub mod subject;

pub use event::{Event, Key};
pub use scripted::{ScriptedFrame, ScriptedInput};
pub use source::{InputError, InputSource, MouseDelta};
pub use subject::{Observer, ObserverHandle, SharedObserver, Subject, SubjectError};

pub fn crate_info() -> &'static str {
    "tilecast-input v0.1.0"
}
