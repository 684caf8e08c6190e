//! Recorded view state and the attachable view slot.
//!
//! The view can come and go (a screen being recreated, a widget scrolled out of
//! a pager). While detached, events only update the recorded state; on attach
//! the latest display mode and refresh indicator are replayed so the new view
//! starts out consistent with the controller.

use smallvec::SmallVec;

use super::event::{ContentEvent, ContentView};
use crate::error::ContentError;

/// What the surface currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DisplayMode {
    /// Nothing was shown yet.
    #[default]
    Idle,
    Content,
    Progress,
    Tip(ContentError),
}

/// Latest display mode and refresh indicators.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentViewState {
    display: DisplayMode,
    header_refreshing: bool,
    footer_refreshing: bool,
}

impl ContentViewState {
    pub fn display(&self) -> &DisplayMode {
        &self.display
    }

    pub fn is_header_refreshing(&self) -> bool {
        self.header_refreshing
    }

    pub fn is_footer_refreshing(&self) -> bool {
        self.footer_refreshing
    }

    /// Folds an event into the recorded state. Mutation and scroll events
    /// carry no state and are ignored.
    pub fn record(&mut self, event: &ContentEvent) {
        match event {
            ContentEvent::ShowContent => self.display = DisplayMode::Content,
            ContentEvent::ShowProgress => self.display = DisplayMode::Progress,
            ContentEvent::ShowBlockingError(error) => {
                self.display = DisplayMode::Tip(error.clone())
            }
            ContentEvent::SetHeaderRefreshing => self.header_refreshing = true,
            ContentEvent::SetFooterRefreshing => self.footer_refreshing = true,
            ContentEvent::StopRefreshing => {
                self.header_refreshing = false;
                self.footer_refreshing = false;
            }
            _ => {}
        }
    }

    /// Events that bring a fresh view up to date.
    pub fn replay_events(&self) -> SmallVec<[ContentEvent; 2]> {
        let mut events = SmallVec::new();
        match &self.display {
            DisplayMode::Idle => {}
            DisplayMode::Content => events.push(ContentEvent::ShowContent),
            DisplayMode::Progress => events.push(ContentEvent::ShowProgress),
            DisplayMode::Tip(error) => events.push(ContentEvent::ShowBlockingError(error.clone())),
        }
        if self.header_refreshing {
            events.push(ContentEvent::SetHeaderRefreshing);
        } else if self.footer_refreshing {
            events.push(ContentEvent::SetFooterRefreshing);
        }
        events
    }
}

/// Holds the optional view and keeps the recorded state in sync with
/// everything emitted through it.
#[derive(Default)]
pub struct ViewSlot {
    view: Option<Box<dyn ContentView>>,
    state: ContentViewState,
}

impl ViewSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ContentViewState {
        &self.state
    }

    pub fn is_attached(&self) -> bool {
        self.view.is_some()
    }

    /// Installs `view` and replays the recorded state into it.
    ///
    /// A previously attached view is dropped.
    pub fn attach(&mut self, mut view: Box<dyn ContentView>) {
        for event in self.state.replay_events() {
            view.on_event(&event);
        }
        self.view = Some(view);
    }

    /// Hands the attached view back, if any.
    pub fn detach(&mut self) -> Option<Box<dyn ContentView>> {
        self.view.take()
    }

    pub fn emit(&mut self, event: ContentEvent) {
        self.state.record(&event);
        if let Some(view) = self.view.as_mut() {
            view.on_event(&event);
        }
    }
}

impl std::fmt::Debug for ViewSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewSlot")
            .field("attached", &self.is_attached())
            .field("state", &self.state)
            .finish()
    }
}
