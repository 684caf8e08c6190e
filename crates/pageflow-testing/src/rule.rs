//! Test rule driving a [`PagedContent`] by hand.
//!
//! The rule owns a controller wired to a [`ScriptedSource`] and a
//! [`RecordingView`]. Tests call entrances on the controller, then play the
//! loader's part with [`respond`](ContentTestRule::respond) and
//! [`fail`](ContentTestRule::fail).
//!
//! # Example
//!
//! ```
//! use pageflow_testing::prelude::*;
//!
//! let mut rule = ContentTestRule::<u32>::new();
//! rule.content_mut().go_to(0).unwrap();
//! rule.respond(vec![1, 2, 3], 0, 2);
//!
//! assert_eq!(rule.content().items(), &[1, 2, 3]);
//! assert!(rule.view().contains(&ContentEvent::ShowContent));
//! ```

use pageflow_foundation::{ContentConfig, ContentError, ContentEvent, PageRequest, PagedContent};

use crate::recording_view::RecordingView;
use crate::scripted_source::ScriptedSource;

pub struct ContentTestRule<T> {
    content: PagedContent<T, ScriptedSource<T>>,
    view: RecordingView,
}

impl<T> ContentTestRule<T>
where
    T: Clone + PartialEq + 'static,
{
    pub fn new() -> Self {
        Self::with_config(ContentConfig::default())
    }

    pub fn with_config(config: ContentConfig) -> Self {
        Self::from_source(ScriptedSource::new(), config)
    }

    /// A rule whose source hands out `items` as the restorable backup.
    pub fn with_backup(items: Vec<T>) -> Self {
        Self::from_source(ScriptedSource::with_backup(items), ContentConfig::default())
    }

    fn from_source(source: ScriptedSource<T>, config: ContentConfig) -> Self {
        let mut content = PagedContent::with_config(source, config);
        let view = RecordingView::new();
        content.attach(view.boxed());
        Self { content, view }
    }

    pub fn content(&self) -> &PagedContent<T, ScriptedSource<T>> {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut PagedContent<T, ScriptedSource<T>> {
        &mut self.content
    }

    pub fn view(&self) -> &RecordingView {
        &self.view
    }

    /// The most recent request the controller handed to its source.
    pub fn last_request(&self) -> PageRequest {
        match self.content.source().last_request() {
            Some(request) => *request,
            None => panic!("no page was requested yet"),
        }
    }

    /// Answers the latest request. Returns whether it was applied.
    pub fn respond(&mut self, items: Vec<T>, min: i32, max: i32) -> bool {
        let request = self.last_request();
        self.respond_to(&request, items, min, max)
    }

    /// Answers `request`, which may already be stale.
    pub fn respond_to(&mut self, request: &PageRequest, items: Vec<T>, min: i32, max: i32) -> bool {
        match self.content.apply_result(request.id(), items, min, max) {
            Ok(applied) => {
                self.assert_consistent();
                applied
            }
            Err(error) => panic!("response to {} rejected: {error}", request.id()),
        }
    }

    /// Fails the latest request. Returns whether the error was applied.
    pub fn fail(&mut self, error: ContentError) -> bool {
        let request = self.last_request();
        self.content.apply_error(request.id(), error)
    }

    pub fn take_events(&self) -> Vec<ContentEvent> {
        self.view.take_events()
    }

    pub fn take_mutations(&self) -> Vec<ContentEvent> {
        self.view.take_mutations()
    }

    /// Panics unless the dividers describe the items exactly.
    pub fn assert_consistent(&self) {
        let window = self.content.window();
        assert!(
            window.is_consistent(),
            "window out of sync: {} item(s), dividers {:?}, pages {}..{}",
            window.len(),
            window.dividers(),
            window.begin_page(),
            window.end_page()
        );
    }
}

impl<T> Default for ContentTestRule<T>
where
    T: Clone + PartialEq + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
