use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::Event;

/// Receives events pushed by a [`Subject`].
pub trait Observer {
    fn on_notify(&mut self, event: &Event);
}

/// Shared, single-threaded observer reference.
pub type SharedObserver = Rc<RefCell<dyn Observer>>;

/// Registration ticket returned by [`Subject::add_observer`].
///
/// Handles are issued in increasing order and never reused, so handle order
/// is registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverHandle(u64);

impl ObserverHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Rejected subject operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubjectError {
    #[error("observer is already registered as handle {}", .0.id())]
    AlreadyRegistered(ObserverHandle),
    #[error("no observer registered under handle {}", .0.id())]
    UnknownHandle(ObserverHandle),
}

/// Maps handles to observers and pushes events to them synchronously.
///
/// The subject holds weak references: it never keeps an observer alive, and
/// an observer dropped without deregistering is skipped.
#[derive(Default)]
pub struct Subject {
    observers: BTreeMap<ObserverHandle, Weak<RefCell<dyn Observer>>>,
    next_handle: u64,
}

impl Subject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Registering the same observer twice fails with
    /// the handle it already holds.
    pub fn add_observer(&mut self, observer: &SharedObserver) -> Result<ObserverHandle, SubjectError> {
        let weak = Rc::downgrade(observer);
        if let Some((handle, _)) = self.observers.iter().find(|(_, o)| o.ptr_eq(&weak)) {
            tracing::warn!(handle = handle.id(), "duplicate observer registration rejected");
            return Err(SubjectError::AlreadyRegistered(*handle));
        }
        let handle = ObserverHandle(self.next_handle);
        self.next_handle += 1;
        self.observers.insert(handle, weak);
        tracing::debug!(handle = handle.id(), "observer registered");
        Ok(handle)
    }

    /// Deregister an observer. Unknown or already removed handles fail.
    pub fn remove_observer(&mut self, handle: ObserverHandle) -> Result<(), SubjectError> {
        match self.observers.remove(&handle) {
            Some(_) => {
                tracing::debug!(handle = handle.id(), "observer removed");
                Ok(())
            }
            None => {
                tracing::warn!(handle = handle.id(), "removal of unknown observer rejected");
                Err(SubjectError::UnknownHandle(handle))
            }
        }
    }

    /// Push one event to every live observer in registration order.
    /// Returns the number of observers notified.
    pub fn notify(&self, event: &Event) -> usize {
        let mut notified = 0;
        for (handle, weak) in &self.observers {
            let Some(observer) = weak.upgrade() else {
                tracing::trace!(handle = handle.id(), "skipping dropped observer");
                continue;
            };
            let Ok(mut observer) = observer.try_borrow_mut() else {
                tracing::warn!(handle = handle.id(), "observer busy, event skipped");
                continue;
            };
            observer.on_notify(event);
            notified += 1;
        }
        notified
    }

    pub fn is_registered(&self, handle: ObserverHandle) -> bool {
        self.observers.contains_key(&handle)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Key;

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<(&'static str, Event)>>>,
    }

    impl Observer for Recorder {
        fn on_notify(&mut self, event: &Event) {
            self.log.borrow_mut().push((self.name, *event));
        }
    }

    fn recorder(
        name: &'static str,
        log: &Rc<RefCell<Vec<(&'static str, Event)>>>,
    ) -> SharedObserver {
        Rc::new(RefCell::new(Recorder {
            name,
            log: log.clone(),
        }))
    }

    #[test]
    fn notifies_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = recorder("A", &log);
        let b = recorder("B", &log);
        let mut subject = Subject::new();
        subject.add_observer(&a).unwrap();
        subject.add_observer(&b).unwrap();

        let n = subject.notify(&Event::key_down(Key::W));
        assert_eq!(n, 2);
        let names: Vec<_> = log.borrow().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn each_event_is_delivered_once_per_observer() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = recorder("A", &log);
        let mut subject = Subject::new();
        subject.add_observer(&a).unwrap();
        subject.notify(&Event::WindowQuit);
        subject.notify(&Event::key_down(Key::S));
        assert_eq!(
            *log.borrow(),
            vec![("A", Event::WindowQuit), ("A", Event::key_down(Key::S))]
        );
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = recorder("A", &log);
        let mut subject = Subject::new();
        let h = subject.add_observer(&a).unwrap();
        assert_eq!(subject.add_observer(&a), Err(SubjectError::AlreadyRegistered(h)));
        assert_eq!(subject.observer_count(), 1);

        subject.notify(&Event::FocusLost);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn removed_handle_is_not_notified_and_cannot_be_removed_twice() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = recorder("A", &log);
        let b = recorder("B", &log);
        let mut subject = Subject::new();
        let ha = subject.add_observer(&a).unwrap();
        subject.add_observer(&b).unwrap();

        subject.remove_observer(ha).unwrap();
        assert!(!subject.is_registered(ha));
        assert_eq!(subject.remove_observer(ha), Err(SubjectError::UnknownHandle(ha)));

        subject.notify(&Event::WindowQuit);
        let names: Vec<_> = log.borrow().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["B"]);
    }

    #[test]
    fn handles_are_never_reused() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = recorder("A", &log);
        let mut subject = Subject::new();
        let first = subject.add_observer(&a).unwrap();
        subject.remove_observer(first).unwrap();
        let second = subject.add_observer(&a).unwrap();
        assert!(second > first);
    }

    #[test]
    fn dropped_observer_is_skipped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut subject = Subject::new();
        {
            let gone = recorder("gone", &log);
            subject.add_observer(&gone).unwrap();
        }
        assert_eq!(subject.notify(&Event::WindowQuit), 0);
        assert!(log.borrow().is_empty());
    }
}
