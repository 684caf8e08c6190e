//! Errors surfaced by the paged content controller.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Shared, thread-safe cause of a failed page load.
///
/// Loaders usually run off the controller thread, so the cause must be `Send + Sync`.
/// It is reference counted because the same failure is both emitted to the view and
/// kept in the recorded view state for replay on attach.
pub type LoadCause = Arc<dyn Error + Send + Sync>;

/// A loader or caller broke the controller's contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractViolation {
    /// A response reported a min page greater than its max page.
    MinAfterMax { min: i32, max: i32 },
    /// A refresh targeted a page outside the loaded window `[begin_page, end_page)`.
    RefreshOutOfRange {
        page: i32,
        begin_page: i32,
        end_page: i32,
    },
    /// A page outside `i32::MIN..i32::MAX`; the page after every loaded page must fit in an `i32`.
    PageOverflow { page: i64 },
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractViolation::MinAfterMax { min, max } => {
                write!(f, "min page {min} is greater than max page {max}")
            }
            ContractViolation::RefreshOutOfRange {
                page,
                begin_page,
                end_page,
            } => write!(
                f,
                "refresh of page {page} outside loaded pages {begin_page}..{end_page}"
            ),
            ContractViolation::PageOverflow { page } => write!(
                f,
                "page {page} is outside the loadable pages {}..{}",
                i32::MIN,
                i32::MAX
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ContentError {
    /// The loader failed (network, parse, ...).
    LoaderFailure(LoadCause),
    /// The loader succeeded with no items and both page bounds are reached.
    NotFound,
    /// No items yet, but pages remain unexplored; a tap may load more.
    TapToLoad,
    /// Restore found no backup. Never shown; restore falls through to the first page.
    BackupUnavailable,
    /// Fatal misuse by the loader or the caller.
    ContractViolation(ContractViolation),
}

impl ContentError {
    /// Wraps a loader failure.
    ///
    /// ```
    /// use pageflow_foundation::ContentError;
    ///
    /// let error = ContentError::loader("connection reset");
    /// assert_eq!(error.to_string(), "load failed: connection reset");
    /// ```
    pub fn loader(cause: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        ContentError::LoaderFailure(Arc::from(cause.into()))
    }

    /// Returns true for the placeholder tips the controller raises on an empty window.
    pub fn is_empty_tip(&self) -> bool {
        matches!(self, ContentError::NotFound | ContentError::TapToLoad)
    }
}

impl PartialEq for ContentError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ContentError::LoaderFailure(a), ContentError::LoaderFailure(b)) => Arc::ptr_eq(a, b),
            (ContentError::NotFound, ContentError::NotFound)
            | (ContentError::TapToLoad, ContentError::TapToLoad)
            | (ContentError::BackupUnavailable, ContentError::BackupUnavailable) => true,
            (ContentError::ContractViolation(a), ContentError::ContractViolation(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::LoaderFailure(cause) => write!(f, "load failed: {cause}"),
            ContentError::NotFound => write!(f, "not found"),
            ContentError::TapToLoad => write!(f, "tap to load"),
            ContentError::BackupUnavailable => write!(f, "no backup to restore"),
            ContentError::ContractViolation(violation) => {
                write!(f, "contract violation: {violation}")
            }
        }
    }
}

impl Error for ContentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ContentError::LoaderFailure(cause) => Some(&**cause),
            _ => None,
        }
    }
}

impl From<ContractViolation> for ContentError {
    fn from(violation: ContractViolation) -> Self {
        ContentError::ContractViolation(violation)
    }
}
