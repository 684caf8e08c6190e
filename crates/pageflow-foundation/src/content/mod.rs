//! Paged content: a bounded window of pages kept in sync with a list view.
//!
//! - [`window`]: flattened items, page dividers and page bounds
//! - [`request`]: request ids and stale-response rejection
//! - [`duplicates`]: duplicate suppression at page seams
//! - [`event`] / [`view_state`]: what the list surface is told, and replay on attach
//! - [`paged_content`]: the controller tying it together

pub mod duplicates;
pub mod event;
pub mod paged_content;
pub mod request;
pub mod solid;
pub mod source;
pub mod view_state;
pub mod window;

pub use duplicates::DuplicateCheck;
pub use event::{ContentEvent, ContentView};
pub use paged_content::PagedContent;
pub use request::{PageRequest, RequestCorrelator, RequestId, RequestKind};
pub use solid::SolidContent;
pub use source::PageSource;
pub use view_state::{ContentViewState, DisplayMode, ViewSlot};
pub use window::{loadable_page, Dividers, PageDiff, PageWindow};
