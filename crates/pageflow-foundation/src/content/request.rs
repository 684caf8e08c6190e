//! Request correlation.
//!
//! Every load attempt gets a fresh [`RequestId`]. Only the most recently issued id
//! is accepted on completion, so a slow, superseded fetch can never touch the window.

use std::fmt;
use std::time::Duration;

use web_time::Instant;

/// Correlation token for one load attempt. Strictly increasing, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Raw value, handy for logging or for tagging messages crossing a thread boundary.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a pending request will do to the window once it completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    /// Seed the window from the backup snapshot.
    Restore,
    /// Replace the whole window with the requested page.
    GoTo,
    /// Prepend the page before `begin_page`.
    PrevPage { adjust_position: bool },
    /// Append the page at `end_page`.
    NextPage { adjust_position: bool },
    /// Replace an already loaded page in place.
    RefreshPage,
}

impl RequestKind {
    /// Restore and GoTo throw the current window away when they complete.
    pub fn discards_window(self) -> bool {
        matches!(self, RequestKind::Restore | RequestKind::GoTo)
    }
}

/// A single issued load: the id to echo back, the page wanted, and why.
///
/// Values are handed to the page source and must be passed back unchanged
/// (at least the id) when completing the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    id: RequestId,
    kind: RequestKind,
    page: i32,
    issued_at: Instant,
}

impl PageRequest {
    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// The page to load. For [`RequestKind::Restore`] this is the page the
    /// snapshot will be installed as.
    pub fn page(&self) -> i32 {
        self.page
    }

    /// Time since the request was issued.
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.issued_at)
    }
}

/// Issues request ids and remembers the single one that is still current.
#[derive(Debug, Default)]
pub struct RequestCorrelator {
    last_id: u64,
    current: Option<PageRequest>,
}

impl RequestCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh request and makes it current.
    ///
    /// Whatever was current before becomes permanently invalid.
    pub fn issue(&mut self, kind: RequestKind, page: i32) -> PageRequest {
        self.last_id += 1;
        let request = PageRequest {
            id: RequestId(self.last_id),
            kind,
            page,
            issued_at: Instant::now(),
        };
        if let Some(superseded) = self.current.replace(request) {
            log::trace!(
                "request {} ({:?} page {}) superseded by {}",
                superseded.id,
                superseded.kind,
                superseded.page,
                request.id
            );
        }
        request
    }

    /// Returns true iff `id` is the current request.
    pub fn validate(&self, id: RequestId) -> bool {
        self.current.is_some_and(|current| current.id == id)
    }

    /// Completes the current request if `id` matches it.
    ///
    /// Returns `None` for stale or unknown ids; the current request is left untouched.
    pub fn complete(&mut self, id: RequestId) -> Option<PageRequest> {
        if self.validate(id) {
            self.current.take()
        } else {
            None
        }
    }

    /// Drops the current request without completing it.
    pub fn cancel(&mut self) -> Option<PageRequest> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&PageRequest> {
        self.current.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.current.is_some()
    }

    /// Returns true once any request has been issued.
    pub fn has_issued(&self) -> bool {
        self.last_id > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_strictly_increase() {
        let mut correlator = RequestCorrelator::new();
        let first = correlator.issue(RequestKind::GoTo, 0);
        let second = correlator.issue(RequestKind::GoTo, 0);
        let third = correlator.issue(RequestKind::NextPage { adjust_position: false }, 1);

        assert!(first.id() < second.id());
        assert!(second.id() < third.id());
    }

    #[test]
    fn test_only_latest_validates() {
        let mut correlator = RequestCorrelator::new();
        let stale = correlator.issue(RequestKind::GoTo, 5);
        let current = correlator.issue(RequestKind::GoTo, 7);

        assert!(!correlator.validate(stale.id()));
        assert!(correlator.validate(current.id()));
    }

    #[test]
    fn test_complete_consumes_current() {
        let mut correlator = RequestCorrelator::new();
        let request = correlator.issue(RequestKind::RefreshPage, 3);

        assert_eq!(correlator.complete(request.id()), Some(request));
        assert!(!correlator.is_pending());
        assert_eq!(correlator.complete(request.id()), None);
    }

    #[test]
    fn test_stale_complete_keeps_current() {
        let mut correlator = RequestCorrelator::new();
        let stale = correlator.issue(RequestKind::GoTo, 5);
        let current = correlator.issue(RequestKind::GoTo, 7);

        assert_eq!(correlator.complete(stale.id()), None);
        assert_eq!(correlator.current(), Some(&current));
    }

    #[test]
    fn test_cancel_invalidates_without_reuse() {
        let mut correlator = RequestCorrelator::new();
        assert!(!correlator.has_issued());

        let cancelled = correlator.issue(RequestKind::Restore, 0);
        assert_eq!(correlator.cancel(), Some(cancelled));
        assert!(!correlator.validate(cancelled.id()));
        assert!(correlator.has_issued());

        let next = correlator.issue(RequestKind::GoTo, 0);
        assert_ne!(next.id(), cancelled.id());
    }
}
