//! Testing utilities and harness for Pageflow

pub mod recording_view;
pub mod rule;
pub mod scripted_source;

pub use recording_view::RecordingView;
pub use rule::ContentTestRule;
pub use scripted_source::ScriptedSource;

pub mod prelude {
    pub use crate::recording_view::RecordingView;
    pub use crate::rule::ContentTestRule;
    pub use crate::scripted_source::ScriptedSource;
    pub use pageflow_foundation::{
        ContentConfig, ContentError, ContentEvent, ContractViolation, DisplayMode, PageRequest,
        PagedContent, RequestKind,
    };
}
