//! Paged content controller.
//!
//! [`PagedContent`] keeps a contiguous window of pages of a page-numbered source
//! in sync with a list view. Entrances ([`go_to`](PagedContent::go_to),
//! [`next_page`](PagedContent::next_page), [`switch_to`](PagedContent::switch_to),
//! the refresh gestures, ...) emit a pre-load display event, issue a fresh
//! request and hand it to the [`PageSource`]. The outcome comes back later through
//! [`apply_result`](PagedContent::apply_result) or
//! [`apply_error`](PagedContent::apply_error); anything tagged with a superseded
//! request id is dropped.
//!
//! The controller is a synchronous, single-threaded state machine. Loaders may run
//! anywhere but must deliver their outcome on the thread that owns the controller.
//!
//! # Example
//!
//! ```
//! use pageflow_foundation::{PageRequest, PageSource, PagedContent};
//!
//! #[derive(Default)]
//! struct Pending(Vec<PageRequest>);
//!
//! impl PageSource<u32> for Pending {
//!     fn request_page(&mut self, request: &PageRequest) {
//!         self.0.push(*request);
//!     }
//! }
//!
//! let mut content = PagedContent::new(Pending::default());
//! let request = content.go_to(0).unwrap();
//! assert!(content.is_loading());
//!
//! // ...later, once the loader is done:
//! content.apply_result(request.id(), vec![1, 2, 3], 0, 4).unwrap();
//! assert_eq!(content.items(), &[1, 2, 3]);
//! assert_eq!(content.page_for_position(2), Some(0));
//! ```

use std::fmt;

use super::duplicates::{self, DuplicateCheck};
use super::event::{ContentEvent, ContentView};
use super::request::{PageRequest, RequestCorrelator, RequestId, RequestKind};
use super::solid::SolidContent;
use super::source::PageSource;
use super::view_state::{ContentViewState, ViewSlot};
use super::window::{self, PageWindow};
use crate::config::ContentConfig;
use crate::error::{ContentError, ContractViolation};

/// Which edge spinner a load started from a non-empty window shows.
#[derive(Clone, Copy)]
enum Edge {
    Header,
    Footer,
}

pub struct PagedContent<T, S> {
    config: ContentConfig,
    window: PageWindow<T>,
    correlator: RequestCorrelator,
    views: ViewSlot,
    source: S,
    is_duplicate: DuplicateCheck<T>,
}

impl<T, S> PagedContent<T, S>
where
    S: PageSource<T>,
{
    /// Creates a controller that treats equal items as duplicates.
    pub fn new(source: S) -> Self
    where
        T: PartialEq + 'static,
    {
        Self::with_config(source, ContentConfig::default())
    }

    pub fn with_config(source: S, config: ContentConfig) -> Self
    where
        T: PartialEq + 'static,
    {
        Self::with_duplicate_check(source, config, |a: &T, b: &T| a == b)
    }

    /// Creates a controller with a custom duplicate predicate, e.g. comparing ids only.
    pub fn with_duplicate_check(
        source: S,
        config: ContentConfig,
        is_duplicate: impl Fn(&T, &T) -> bool + 'static,
    ) -> Self {
        Self {
            config,
            window: PageWindow::new(),
            correlator: RequestCorrelator::new(),
            views: ViewSlot::new(),
            source,
            is_duplicate: Box::new(is_duplicate),
        }
    }

    #[cfg(test)]
    pub(crate) fn replace_window(&mut self, window: PageWindow<T>) {
        self.window = window;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn window(&self) -> &PageWindow<T> {
        &self.window
    }

    pub fn items(&self) -> &[T] {
        self.window.items()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.window.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.window.iter()
    }

    pub fn dividers(&self) -> &[usize] {
        self.window.dividers()
    }

    pub fn begin_page(&self) -> i32 {
        self.window.begin_page()
    }

    pub fn end_page(&self) -> i32 {
        self.window.end_page()
    }

    /// Lowest valid page, as last reported by the loader.
    pub fn min_page(&self) -> i32 {
        self.window.min_page()
    }

    /// One past the highest valid page, as last reported by the loader.
    pub fn max_page(&self) -> i32 {
        self.window.max_page()
    }

    pub fn is_min_reached(&self) -> bool {
        self.window.is_min_reached()
    }

    pub fn is_max_reached(&self) -> bool {
        self.window.is_max_reached()
    }

    /// Returns `true` while a request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.correlator.is_pending()
    }

    pub fn pending_request(&self) -> Option<&PageRequest> {
        self.correlator.current()
    }

    /// Page holding the item at `position`, `None` outside the loaded items.
    pub fn page_for_position(&self, position: usize) -> Option<i32> {
        self.window.page_for_position(position)
    }

    pub fn view_state(&self) -> &ContentViewState {
        self.views.state()
    }

    /// Copies the items into a read-only snapshot that no longer follows this controller.
    pub fn solidify(&self) -> SolidContent<T>
    where
        T: Clone,
    {
        SolidContent::new(self.window.items().to_vec())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // View
    // ─────────────────────────────────────────────────────────────────────────

    /// Attaches a view and brings it up to date with the recorded display state.
    pub fn attach(&mut self, view: Box<dyn ContentView>) {
        self.views.attach(view);
    }

    pub fn detach(&mut self) -> Option<Box<dyn ContentView>> {
        self.views.detach()
    }

    pub fn is_attached(&self) -> bool {
        self.views.is_attached()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Entrances
    // ─────────────────────────────────────────────────────────────────────────

    /// Seeds the window from the source's backup, then goes to the first page.
    ///
    /// Only honored before any other request was issued. Returns the follow-up
    /// request to the first page, or `None` when ignored.
    pub fn restore(&mut self) -> Option<PageRequest> {
        if self.correlator.has_issued() {
            log::warn!("restore ignored: pages were already requested");
            return None;
        }
        let first = self.check_page(i64::from(self.config.first_page)).ok()?;
        self.emit(ContentEvent::StopRefreshing);
        self.emit(ContentEvent::ShowProgress);

        let request = self.correlator.issue(RequestKind::Restore, first);
        log::debug!("restoring backup as page {first} ({})", request.id());

        match self.source.load_backup() {
            Some(items) => {
                if self.settle(request.id()).is_some() {
                    if let Err(error) = self.on_restore(items) {
                        log::warn!("restore failed: {error}");
                    }
                }
            }
            None => {
                self.apply_error(request.id(), ContentError::BackupUnavailable);
            }
        }
        self.correlator.current().copied()
    }

    /// Discards the window and loads `page` fresh.
    ///
    /// `i32::MAX` is rejected with [`ContractViolation::PageOverflow`]; nothing is issued.
    pub fn go_to(&mut self, page: i32) -> Result<PageRequest, ContentError> {
        let page = self.check_page(i64::from(page))?;
        self.emit_pre_load(Edge::Header);
        Ok(self.issue(RequestKind::GoTo, page))
    }

    /// Shows `page`: scrolls if it is loaded, extends the window if it is adjacent,
    /// goes to it otherwise. Returns `Ok(None)` when only a scroll was needed.
    pub fn switch_to(&mut self, page: i32) -> Result<Option<PageRequest>, ContentError> {
        if let Some(range) = self.window.page_range(page) {
            self.emit(ContentEvent::ScrollTo(range.start));
            Ok(None)
        } else if page == self.window.end_page() {
            self.next_page(true).map(Some)
        } else if self.window.begin_page().checked_sub(1) == Some(page) {
            self.prev_page(true).map(Some)
        } else {
            self.go_to(page).map(Some)
        }
    }

    /// Loads the page before the window. Does not check [`is_min_reached`](Self::is_min_reached).
    pub fn prev_page(&mut self, adjust_position: bool) -> Result<PageRequest, ContentError> {
        let page = self.check_page(i64::from(self.window.begin_page()) - 1)?;
        self.emit_pre_load(Edge::Header);
        Ok(self.issue(RequestKind::PrevPage { adjust_position }, page))
    }

    /// Loads the page after the window. Does not check [`is_max_reached`](Self::is_max_reached).
    pub fn next_page(&mut self, adjust_position: bool) -> Result<PageRequest, ContentError> {
        let page = self.check_page(i64::from(self.window.end_page()))?;
        self.emit_pre_load(Edge::Footer);
        Ok(self.issue(RequestKind::NextPage { adjust_position }, page))
    }

    /// Reloads an already loaded page and replaces it in place.
    pub fn refresh_page(&mut self, page: i32) -> Result<PageRequest, ContentError> {
        if !self.window.contains_page(page) {
            return Err(self.refresh_out_of_range(page));
        }
        self.emit(ContentEvent::SetFooterRefreshing);
        Ok(self.issue(RequestKind::RefreshPage, page))
    }

    /// The list was scrolled to its last row.
    pub fn on_reach_bottom(&mut self) -> Option<PageRequest> {
        if self.window.is_max_reached() {
            None
        } else {
            self.next_page(false).ok()
        }
    }

    /// The user tapped the error tip.
    pub fn on_click_retry(&mut self) -> Result<PageRequest, ContentError> {
        if !self.window.is_max_reached() {
            self.next_page(true)
        } else if !self.window.is_min_reached() {
            self.prev_page(true)
        } else {
            self.go_to(self.config.first_page)
        }
    }

    /// Pull-to-refresh from the top. Starts over at the first page when nothing is loaded.
    pub fn on_refresh_header(&mut self) -> Result<PageRequest, ContentError> {
        if !self.window.has_pages() {
            self.go_to(self.config.first_page)
        } else if self.window.is_min_reached() {
            self.go_to(self.window.begin_page())
        } else {
            self.prev_page(false)
        }
    }

    /// Pull-to-refresh from the bottom. Reloads the last page once the end is reached.
    pub fn on_refresh_footer(&mut self) -> Option<PageRequest> {
        if !self.window.has_pages() {
            self.emit(ContentEvent::StopRefreshing);
            None
        } else if self.window.is_max_reached() {
            self.refresh_page(self.window.end_page() - 1).ok()
        } else {
            self.next_page(false).ok()
        }
    }

    /// Cancels any pending request, clears the window and shows `error` as a blocking tip.
    pub fn force_error(&mut self, error: ContentError) {
        self.cancel_pending();
        self.emit(ContentEvent::StopRefreshing);
        self.reset_window();
        self.emit(ContentEvent::ShowBlockingError(error));
    }

    /// Cancels any pending request, clears the window and shows progress.
    pub fn force_progress(&mut self) {
        self.cancel_pending();
        self.emit(ContentEvent::StopRefreshing);
        self.reset_window();
        self.emit(ContentEvent::ShowProgress);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Completion
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies a loaded page.
    ///
    /// Returns `Ok(false)` if `id` is not the current request (nothing changes),
    /// `Ok(true)` once applied. A response with `min > max` is rejected with
    /// [`ContractViolation::MinAfterMax`]; the request is consumed and the window
    /// left untouched.
    pub fn apply_result(
        &mut self,
        id: RequestId,
        items: Vec<T>,
        min: i32,
        max: i32,
    ) -> Result<bool, ContentError> {
        let Some(request) = self.settle(id) else {
            log::debug!(
                "dropping stale response {id} ({} item(s)), current is {:?}",
                items.len(),
                self.correlator.current().map(PageRequest::id)
            );
            return Ok(false);
        };
        if min > max {
            let violation = ContractViolation::MinAfterMax { min, max };
            log::warn!("rejecting response {id}: {violation}");
            return Err(violation.into());
        }

        log::debug!(
            "applying {} item(s) for page {} ({:?}, {id}) after {:?}",
            items.len(),
            request.page(),
            request.kind(),
            request.elapsed()
        );
        match request.kind() {
            RequestKind::Restore => self.on_restore(items)?,
            RequestKind::GoTo => self.on_go_to(request.page(), items, min, max)?,
            RequestKind::PrevPage { adjust_position } => {
                self.on_prev_page(items, min, max, adjust_position)?
            }
            RequestKind::NextPage { adjust_position } => {
                self.on_next_page(items, min, max, adjust_position)?
            }
            RequestKind::RefreshPage => self.on_refresh_page(request.page(), items, min, max)?,
        }
        debug_assert!(self.window.is_consistent(), "dividers out of sync");
        Ok(true)
    }

    /// [`apply_result`](Self::apply_result) for sources whose first page is always `0`.
    pub fn apply_result_from_zero(
        &mut self,
        id: RequestId,
        items: Vec<T>,
        max: i32,
    ) -> Result<bool, ContentError> {
        self.apply_result(id, items, 0, max)
    }

    /// Applies a failed load. Returns `false` if `id` is not the current request.
    ///
    /// A failed restore silently falls through to the first page. A failure on an
    /// empty window becomes a blocking tip; otherwise the loaded pages stay and the
    /// error is shown as a transient message.
    pub fn apply_error(&mut self, id: RequestId, error: ContentError) -> bool {
        let Some(request) = self.settle(id) else {
            log::debug!("dropping stale error {id}: {error}");
            return false;
        };
        log::debug!(
            "request {id} ({:?} page {}) failed after {:?}: {error}",
            request.kind(),
            request.page(),
            request.elapsed()
        );

        if request.kind() == RequestKind::Restore {
            self.reset_window();
            self.emit(ContentEvent::ShowProgress);
            // Checked when the restore was issued.
            self.go_to(self.config.first_page).ok();
        } else if self.window.is_empty() {
            self.reset_window();
            self.emit(ContentEvent::ShowBlockingError(error));
        } else {
            if request.kind().discards_window() {
                log::debug!("keeping {} loaded item(s) after failed {:?}", self.len(), request.kind());
            }
            self.emit(ContentEvent::ShowTransientMessage(error));
        }
        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    fn on_restore(&mut self, items: Vec<T>) -> Result<(), ContentError> {
        // The snapshot is always taken as the single first page.
        let first = self.check_page(i64::from(self.config.first_page))?;
        let had_items = !self.window.is_empty();
        let has_items = !items.is_empty();
        self.window.reset_to(first, items, first, first + 1)?;
        if had_items || has_items {
            self.emit(ContentEvent::ResetAll);
        }

        if has_items {
            self.emit(ContentEvent::ShowContent);
            self.emit(ContentEvent::ScrollTo(0));
            self.emit(ContentEvent::SetHeaderRefreshing);
        } else {
            self.emit(ContentEvent::ShowProgress);
        }

        self.go_to(first)?;
        Ok(())
    }

    fn on_go_to(&mut self, page: i32, items: Vec<T>, min: i32, max: i32) -> Result<(), ContentError> {
        if page == min && !items.is_empty() {
            self.source.save_backup(&items);
        }

        let had_items = !self.window.is_empty();
        let has_items = !items.is_empty();
        self.window.reset_to(page, items, min, max)?;
        if had_items || has_items {
            self.emit(ContentEvent::ResetAll);
        }

        if has_items {
            self.emit(ContentEvent::ShowContent);
            self.emit(ContentEvent::ScrollTo(0));
        } else {
            self.show_empty_tip();
        }
        Ok(())
    }

    fn on_prev_page(
        &mut self,
        items: Vec<T>,
        min: i32,
        max: i32,
        adjust_position: bool,
    ) -> Result<(), ContentError> {
        let control = duplicates::around(0, self.config.duplicates_check_range, self.len());
        let items = self.filter_duplicates(items, control);

        let count = self.window.prepend_page(items, min, max)?;
        if count != 0 {
            self.emit(ContentEvent::InsertRange { start: 0, count });
        }

        if self.window.is_empty() {
            self.show_empty_tip();
        } else {
            self.emit(ContentEvent::ShowContent);
            if adjust_position {
                self.emit(ContentEvent::ScrollTo(0));
            } else {
                self.emit(ContentEvent::NudgeUp);
            }
        }
        Ok(())
    }

    fn on_next_page(
        &mut self,
        items: Vec<T>,
        min: i32,
        max: i32,
        adjust_position: bool,
    ) -> Result<(), ContentError> {
        let len = self.len();
        let control = duplicates::around(len, self.config.duplicates_check_range, len);
        let items = self.filter_duplicates(items, control);

        let inserted = self.window.append_page(items, min, max)?;
        if !inserted.is_empty() {
            self.emit(ContentEvent::InsertRange {
                start: inserted.start,
                count: inserted.len(),
            });
        }

        if self.window.is_empty() {
            self.show_empty_tip();
        } else {
            self.emit(ContentEvent::ShowContent);
            if !adjust_position {
                self.emit(ContentEvent::NudgeDown);
            } else if !inserted.is_empty() {
                self.emit(ContentEvent::ScrollTo(inserted.start));
            }
        }
        Ok(())
    }

    fn on_refresh_page(
        &mut self,
        page: i32,
        items: Vec<T>,
        min: i32,
        max: i32,
    ) -> Result<(), ContentError> {
        let Some(range) = self.window.page_range(page) else {
            return Err(self.refresh_out_of_range(page));
        };

        // Compare against the neighbours just outside the replaced slice only.
        let len = self.len();
        let check_range = self.config.duplicates_check_range;
        let items = self.filter_duplicates(items, duplicates::before(range.start, check_range, len));
        let items = self.filter_duplicates(items, duplicates::after(range.end, check_range, len));

        let Some(diff) = self.window.replace_page(page, items, min, max) else {
            return Err(self.refresh_out_of_range(page));
        };
        if !diff.changed.is_empty() {
            self.emit(ContentEvent::ChangeRange {
                start: diff.changed.start,
                count: diff.changed.len(),
            });
        }
        if !diff.removed.is_empty() {
            self.emit(ContentEvent::RemoveRange {
                start: diff.removed.start,
                count: diff.removed.len(),
            });
        }
        if !diff.inserted.is_empty() {
            self.emit(ContentEvent::InsertRange {
                start: diff.inserted.start,
                count: diff.inserted.len(),
            });
        }

        if self.window.is_empty() {
            self.show_empty_tip();
        } else {
            self.emit(ContentEvent::ShowContent);
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn issue(&mut self, kind: RequestKind, page: i32) -> PageRequest {
        let request = self.correlator.issue(kind, page);
        log::debug!("requesting page {page} for {kind:?} ({})", request.id());
        self.source.request_page(&request);
        request
    }

    /// Completes `id` if it is current and stops the refresh spinners.
    fn settle(&mut self, id: RequestId) -> Option<PageRequest> {
        let request = self.correlator.complete(id)?;
        self.emit(ContentEvent::StopRefreshing);
        Some(request)
    }

    fn cancel_pending(&mut self) {
        if let Some(request) = self.correlator.cancel() {
            log::debug!("cancelled request {} for page {}", request.id(), request.page());
        }
    }

    fn emit_pre_load(&mut self, edge: Edge) {
        if self.window.is_empty() {
            self.emit(ContentEvent::StopRefreshing);
            self.emit(ContentEvent::ShowProgress);
        } else {
            self.emit(match edge {
                Edge::Header => ContentEvent::SetHeaderRefreshing,
                Edge::Footer => ContentEvent::SetFooterRefreshing,
            });
            self.emit(ContentEvent::ShowContent);
        }
    }

    fn show_empty_tip(&mut self) {
        let tip = if self.window.is_min_reached() && self.window.is_max_reached() {
            ContentError::NotFound
        } else {
            ContentError::TapToLoad
        };
        self.emit(ContentEvent::ShowBlockingError(tip));
    }

    fn reset_window(&mut self) {
        let had_items = !self.window.is_empty();
        self.window.clear();
        if had_items {
            self.emit(ContentEvent::ResetAll);
        }
    }

    fn filter_duplicates(&self, items: Vec<T>, control: std::ops::Range<usize>) -> Vec<T> {
        if !self.config.remove_duplicates {
            return items;
        }
        duplicates::remove_duplicates(items, self.window.items(), control, &*self.is_duplicate)
    }

    fn check_page(&self, page: i64) -> Result<i32, ContentError> {
        window::loadable_page(page).map_err(|violation| {
            log::warn!("{violation}");
            ContentError::from(violation)
        })
    }

    fn refresh_out_of_range(&self, page: i32) -> ContentError {
        let violation = ContractViolation::RefreshOutOfRange {
            page,
            begin_page: self.window.begin_page(),
            end_page: self.window.end_page(),
        };
        log::warn!("{violation}");
        violation.into()
    }

    fn emit(&mut self, event: ContentEvent) {
        self.views.emit(event);
    }
}

impl<'a, T, S> IntoIterator for &'a PagedContent<T, S>
where
    S: PageSource<T>,
{
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> fmt::Debug for PagedContent<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedContent")
            .field("len", &self.window.len())
            .field("pages", &(self.window.begin_page()..self.window.end_page()))
            .field("bounds", &(self.window.min_page()..self.window.max_page()))
            .field("pending", &self.correlator.current().map(PageRequest::id))
            .field("views", &self.views)
            .finish()
    }
}
