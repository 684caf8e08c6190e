//! Events pushed to the rendering side.

use crate::error::ContentError;

/// A fire-and-forget instruction for the list surface.
///
/// Display events pick what the surface shows, refresh events drive the
/// header/footer spinners, and mutation events describe exactly which rows
/// changed so the list can animate instead of redrawing everything.
#[derive(Clone, Debug, PartialEq)]
pub enum ContentEvent {
    ShowContent,
    ShowProgress,
    /// Replace the whole surface with an error tip.
    ShowBlockingError(ContentError),
    /// Non-interrupting notification; the list stays visible.
    ShowTransientMessage(ContentError),

    SetHeaderRefreshing,
    SetFooterRefreshing,
    StopRefreshing,

    /// Everything changed, redraw from scratch.
    ResetAll,
    InsertRange { start: usize, count: usize },
    RemoveRange { start: usize, count: usize },
    ChangeRange { start: usize, count: usize },
    ScrollTo(usize),
    NudgeUp,
    NudgeDown,
}

impl ContentEvent {
    /// Returns true for events that describe a change of the item list.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            ContentEvent::ResetAll
                | ContentEvent::InsertRange { .. }
                | ContentEvent::RemoveRange { .. }
                | ContentEvent::ChangeRange { .. }
        )
    }
}

/// Receiver of [`ContentEvent`]s, typically a list widget adapter.
pub trait ContentView {
    fn on_event(&mut self, event: &ContentEvent);
}

impl<F> ContentView for F
where
    F: FnMut(&ContentEvent),
{
    fn on_event(&mut self, event: &ContentEvent) {
        self(event)
    }
}
