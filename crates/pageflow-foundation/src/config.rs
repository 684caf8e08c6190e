//! Tunables for [`PagedContent`](crate::PagedContent).

/// Default neighborhood size used when filtering duplicates at a page seam.
pub const DEFAULT_DUPLICATES_CHECK_RANGE: usize = 50;

/// Page requested by restore fallbacks and retries on an empty window.
pub const DEFAULT_FIRST_PAGE: i32 = 0;

/// Configuration for a paged content controller.
///
/// ```
/// use pageflow_foundation::ContentConfig;
///
/// let config = ContentConfig::default().with_duplicates_check_range(10);
/// assert!(config.remove_duplicates);
/// assert_eq!(config.duplicates_check_range, 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentConfig {
    /// Whether items of a freshly loaded page that match existing items near
    /// the insertion point are dropped. Items within one page are never
    /// compared with each other.
    pub remove_duplicates: bool,

    /// How many existing items on each side of the insertion point are
    /// compared against the incoming page.
    pub duplicates_check_range: usize,

    /// The page a restore chains into, and the page a retry falls back to.
    pub first_page: i32,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            remove_duplicates: true,
            duplicates_check_range: DEFAULT_DUPLICATES_CHECK_RANGE,
            first_page: DEFAULT_FIRST_PAGE,
        }
    }
}

impl ContentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remove_duplicates(mut self, remove_duplicates: bool) -> Self {
        self.remove_duplicates = remove_duplicates;
        self
    }

    pub fn with_duplicates_check_range(mut self, range: usize) -> Self {
        self.duplicates_check_range = range;
        self
    }

    pub fn with_first_page(mut self, page: i32) -> Self {
        self.first_page = page;
        self
    }
}
