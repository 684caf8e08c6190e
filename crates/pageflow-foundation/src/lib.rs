//! Foundation of Pageflow: incremental, page-numbered list loading.
//!
//! [`PagedContent`] holds a contiguous window of loaded pages, issues page requests
//! through a [`PageSource`], rejects responses to superseded requests, and tells a
//! [`ContentView`] exactly which rows were inserted, removed or changed.

pub mod config;
pub mod content;
pub mod error;

pub use config::{ContentConfig, DEFAULT_DUPLICATES_CHECK_RANGE, DEFAULT_FIRST_PAGE};
pub use content::*;
pub use error::{ContentError, ContractViolation, LoadCause};

#[cfg(test)]
#[path = "tests/paged_content_tests.rs"]
mod paged_content_tests;
