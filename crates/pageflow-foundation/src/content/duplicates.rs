//! Duplicate suppression at page seams.
//!
//! An upstream source can shift by an item between two page fetches, so the last
//! item of one page may show up again as the first item of the next. Only the
//! existing items close to where a page is inserted are compared; an identical
//! item further away may legitimately appear twice.

use std::ops::Range;

/// Caller supplied duplicate predicate.
pub type DuplicateCheck<T> = Box<dyn Fn(&T, &T) -> bool>;

/// `[index - radius, index + radius)` clamped to `[0, len)`.
pub fn around(index: usize, radius: usize, len: usize) -> Range<usize> {
    clamp(index.saturating_sub(radius), index.saturating_add(radius), len)
}

/// `[index - radius, index)` clamped to `[0, len)`.
pub fn before(index: usize, radius: usize, len: usize) -> Range<usize> {
    clamp(index.saturating_sub(radius), index, len)
}

/// `[index, index + radius)` clamped to `[0, len)`.
pub fn after(index: usize, radius: usize, len: usize) -> Range<usize> {
    clamp(index, index.saturating_add(radius), len)
}

fn clamp(start: usize, end: usize, len: usize) -> Range<usize> {
    let end = end.min(len);
    start.min(end)..end
}

/// Drops every incoming item that matches any item of `existing[control]`.
///
/// Incoming items are never compared with each other.
pub fn remove_duplicates<T>(
    incoming: Vec<T>,
    existing: &[T],
    control: Range<usize>,
    is_duplicate: &dyn Fn(&T, &T) -> bool,
) -> Vec<T> {
    let control = &existing[control];
    if control.is_empty() {
        return incoming;
    }
    let before = incoming.len();
    let kept: Vec<T> = incoming
        .into_iter()
        .filter(|item| !control.iter().any(|other| is_duplicate(item, other)))
        .collect();
    if kept.len() != before {
        log::debug!("dropped {} duplicate item(s) at page seam", before - kept.len());
    }
    kept
}
