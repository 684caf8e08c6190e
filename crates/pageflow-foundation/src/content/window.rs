//! The in-memory window of loaded pages.
//!
//! Items of every loaded page are kept flattened in one list. Page boundaries are
//! tracked as cumulative end offsets ("dividers"): with pages 3, 4 and 5 of sizes
//! 7, 8 and 9 loaded, the dividers are `[7, 15, 24]`.

use std::ops::Range;

use smallvec::SmallVec;

use crate::error::ContractViolation;

/// Divider storage. A window rarely holds more than a handful of pages.
pub type Dividers = SmallVec<[usize; 8]>;

/// Accepts `page` if it can be loaded: it and the page after it must fit in an `i32`.
pub fn loadable_page(page: i64) -> Result<i32, ContractViolation> {
    match i32::try_from(page) {
        Ok(page) if page != i32::MAX => Ok(page),
        _ => Err(ContractViolation::PageOverflow { page }),
    }
}

/// Ranges touched by replacing one page in place.
///
/// The old slice and the new slice are lined up at the page start: the common
/// prefix is changed, then either the old surplus is removed or the new surplus
/// is inserted. Never both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageDiff {
    pub changed: Range<usize>,
    pub removed: Range<usize>,
    pub inserted: Range<usize>,
}

/// Contiguous pages `[begin_page, end_page)` inside the known range
/// `[min_page, max_page)`.
#[derive(Clone, Debug)]
pub struct PageWindow<T> {
    items: Vec<T>,
    dividers: Dividers,
    begin_page: i32,
    end_page: i32,
    min_page: i32,
    max_page: i32,
}

impl<T> Default for PageWindow<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            dividers: Dividers::new(),
            begin_page: 0,
            end_page: 0,
            min_page: 0,
            max_page: 0,
        }
    }
}

impl<T> PageWindow<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a window from raw parts. Used by tests that start mid-session.
    #[cfg(test)]
    pub(crate) fn from_parts(
        items: Vec<T>,
        dividers: &[usize],
        begin_page: i32,
        end_page: i32,
        min_page: i32,
        max_page: i32,
    ) -> Self {
        let window = Self {
            items,
            dividers: Dividers::from_slice(dividers),
            begin_page,
            end_page,
            min_page,
            max_page,
        };
        assert!(window.is_consistent(), "inconsistent window parts");
        window
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn dividers(&self) -> &[usize] {
        &self.dividers
    }

    pub fn begin_page(&self) -> i32 {
        self.begin_page
    }

    pub fn end_page(&self) -> i32 {
        self.end_page
    }

    pub fn min_page(&self) -> i32 {
        self.min_page
    }

    pub fn max_page(&self) -> i32 {
        self.max_page
    }

    /// Number of loaded pages, including pages that turned out empty.
    pub fn page_count(&self) -> usize {
        self.dividers.len()
    }

    pub fn has_pages(&self) -> bool {
        self.begin_page != self.end_page
    }

    pub fn is_min_reached(&self) -> bool {
        self.begin_page <= self.min_page
    }

    pub fn is_max_reached(&self) -> bool {
        self.end_page >= self.max_page
    }

    pub fn contains_page(&self, page: i32) -> bool {
        (self.begin_page..self.end_page).contains(&page)
    }

    /// Item index range of a loaded page.
    pub fn page_range(&self, page: i32) -> Option<Range<usize>> {
        if !self.contains_page(page) {
            return None;
        }
        let offset = (page - self.begin_page) as usize;
        let start = if offset == 0 {
            0
        } else {
            self.dividers[offset - 1]
        };
        Some(start..self.dividers[offset])
    }

    /// Page holding the item at `position`, by linear scan of the dividers.
    pub fn page_for_position(&self, position: usize) -> Option<i32> {
        self.dividers
            .iter()
            .position(|&divider| position < divider)
            .map(|offset| self.begin_page + offset as i32)
    }

    /// Forgets every page and resets all page numbers to zero.
    pub fn clear(&mut self) {
        self.items.clear();
        self.dividers.clear();
        self.begin_page = 0;
        self.end_page = 0;
        self.min_page = 0;
        self.max_page = 0;
    }

    /// Replaces the whole window with a single page.
    ///
    /// Fails without touching the window if `page` is `i32::MAX`.
    pub fn reset_to(
        &mut self,
        page: i32,
        items: Vec<T>,
        min_page: i32,
        max_page: i32,
    ) -> Result<(), ContractViolation> {
        let end_page = page.checked_add(1).ok_or(ContractViolation::PageOverflow {
            page: i64::from(page),
        })?;
        self.dividers.clear();
        self.dividers.push(items.len());
        self.items = items;
        self.begin_page = page;
        self.end_page = end_page;
        self.set_bounds(min_page, max_page);
        Ok(())
    }

    /// Prepends page `begin_page - 1`. Returns the number of inserted items.
    pub fn prepend_page(
        &mut self,
        items: Vec<T>,
        min_page: i32,
        max_page: i32,
    ) -> Result<usize, ContractViolation> {
        let begin_page = self.begin_page.checked_sub(1).ok_or(ContractViolation::PageOverflow {
            page: i64::from(self.begin_page) - 1,
        })?;
        let count = items.len();
        if count != 0 {
            self.items.splice(0..0, items);
            for divider in self.dividers.iter_mut() {
                *divider += count;
            }
        }
        self.dividers.insert(0, count);
        self.begin_page = begin_page;
        self.set_bounds(min_page, max_page);
        Ok(count)
    }

    /// Appends page `end_page`. Returns the inserted index range.
    pub fn append_page(
        &mut self,
        items: Vec<T>,
        min_page: i32,
        max_page: i32,
    ) -> Result<Range<usize>, ContractViolation> {
        let end_page = self.end_page.checked_add(1).ok_or(ContractViolation::PageOverflow {
            page: i64::from(self.end_page),
        })?;
        let start = self.items.len();
        self.items.extend(items);
        let end = self.items.len();
        self.dividers.push(end);
        self.end_page = end_page;
        self.set_bounds(min_page, max_page);
        Ok(start..end)
    }

    /// Replaces a loaded page in place and shifts the dividers that follow.
    ///
    /// Returns `None` without touching anything if `page` is not loaded.
    pub fn replace_page(
        &mut self,
        page: i32,
        items: Vec<T>,
        min_page: i32,
        max_page: i32,
    ) -> Option<PageDiff> {
        let Range {
            start,
            end: old_end,
        } = self.page_range(page)?;
        let old_count = old_end - start;
        let new_count = items.len();
        let overlap = old_count.min(new_count);

        self.items.splice(start..old_end, items);

        let new_end = start + new_count;
        if new_end != old_end {
            let offset = (page - self.begin_page) as usize;
            for divider in self.dividers[offset..].iter_mut() {
                *divider = *divider - old_end + new_end;
            }
        }
        self.set_bounds(min_page, max_page);

        let changed_end = start + overlap;
        Some(PageDiff {
            changed: start..changed_end,
            removed: changed_end..start + old_count.max(overlap),
            inserted: changed_end..start + new_count.max(overlap),
        })
    }

    pub fn set_bounds(&mut self, min_page: i32, max_page: i32) {
        self.min_page = min_page;
        self.max_page = max_page;
    }

    /// Checks the divider invariants: one divider per loaded page, strictly
    /// ordered (equal neighbours for empty pages), the last one matching the
    /// item count.
    pub fn is_consistent(&self) -> bool {
        let span = i64::from(self.end_page) - i64::from(self.begin_page);
        if span < 0 || span as usize != self.dividers.len() {
            return false;
        }
        if self.dividers.windows(2).any(|pair| pair[0] > pair[1]) {
            return false;
        }
        match self.dividers.last() {
            Some(&last) => last == self.items.len(),
            None => self.items.is_empty(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}
