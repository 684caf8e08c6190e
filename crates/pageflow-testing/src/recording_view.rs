//! A [`ContentView`] that remembers everything it was told.

use std::cell::RefCell;
use std::rc::Rc;

use pageflow_foundation::{ContentEvent, ContentView};

/// Records every event it receives.
///
/// Clones share the same log, so one handle can be attached to a controller
/// while the test keeps the other to inspect what arrived.
#[derive(Clone, Default)]
pub struct RecordingView {
    events: Rc<RefCell<Vec<ContentEvent>>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// A boxed handle suitable for [`PagedContent::attach`](pageflow_foundation::PagedContent::attach).
    pub fn boxed(&self) -> Box<dyn ContentView> {
        Box::new(self.clone())
    }

    pub fn events(&self) -> Vec<ContentEvent> {
        self.events.borrow().clone()
    }

    /// Drains the log.
    pub fn take_events(&self) -> Vec<ContentEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Drains the log, keeping only list mutations.
    pub fn take_mutations(&self) -> Vec<ContentEvent> {
        self.take_events()
            .into_iter()
            .filter(ContentEvent::is_mutation)
            .collect()
    }

    pub fn last(&self) -> Option<ContentEvent> {
        self.events.borrow().last().cloned()
    }

    pub fn contains(&self, event: &ContentEvent) -> bool {
        self.events.borrow().contains(event)
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl ContentView for RecordingView {
    fn on_event(&mut self, event: &ContentEvent) {
        log::trace!("view <- {event:?}");
        self.events.borrow_mut().push(event.clone());
    }
}

impl std::fmt::Debug for RecordingView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingView")
            .field("events", &self.events.borrow().len())
            .finish()
    }
}
