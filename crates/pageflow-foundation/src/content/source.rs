//! The loading side of the controller.

use super::request::PageRequest;

/// Provides pages and keeps the backup snapshot.
///
/// `request_page` must not block and must not call back into the controller.
/// Deliver the outcome later, on the controller's thread, through
/// [`PagedContent::apply_result`](crate::PagedContent::apply_result) or
/// [`PagedContent::apply_error`](crate::PagedContent::apply_error) tagged with
/// `request.id()`.
pub trait PageSource<T> {
    /// Starts loading `request.page()`.
    fn request_page(&mut self, request: &PageRequest);

    /// Returns the items backed up by [`save_backup`](Self::save_backup), if any.
    ///
    /// The snapshot is assumed to be exactly one page with unknown bounds.
    fn load_backup(&mut self) -> Option<Vec<T>> {
        None
    }

    /// Called when the first page was loaded with items. Must not block.
    fn save_backup(&mut self, items: &[T]) {
        let _ = items;
    }
}
