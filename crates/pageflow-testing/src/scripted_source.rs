//! A [`PageSource`] that only records what it was asked for.

use pageflow_foundation::{PageRequest, PageSource};

/// Collects requests so the test can answer them in any order.
#[derive(Debug)]
pub struct ScriptedSource<T> {
    requests: Vec<PageRequest>,
    backup: Option<Vec<T>>,
    saved: Vec<Vec<T>>,
}

impl<T> Default for ScriptedSource<T> {
    fn default() -> Self {
        Self {
            requests: Vec::new(),
            backup: None,
            saved: Vec::new(),
        }
    }
}

impl<T: Clone> ScriptedSource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source whose first [`load_backup`](PageSource::load_backup) returns `items`.
    pub fn with_backup(items: Vec<T>) -> Self {
        Self {
            backup: Some(items),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> &[PageRequest] {
        &self.requests
    }

    pub fn last_request(&self) -> Option<&PageRequest> {
        self.requests.last()
    }

    /// Every snapshot handed to [`save_backup`](PageSource::save_backup), oldest first.
    pub fn saved_backups(&self) -> &[Vec<T>] {
        &self.saved
    }
}

impl<T: Clone> PageSource<T> for ScriptedSource<T> {
    fn request_page(&mut self, request: &PageRequest) {
        self.requests.push(*request);
    }

    fn load_backup(&mut self) -> Option<Vec<T>> {
        self.backup.take()
    }

    fn save_backup(&mut self, items: &[T]) {
        self.saved.push(items.to_vec());
    }
}
