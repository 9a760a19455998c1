//! Page slicing and page-number bookkeeping.
//!
//! Pages are 1-indexed. The current page always stays within
//! `[1, max(1, total_pages)]`; with zero matching records there are zero pages
//! and the current page is still 1.

use std::ops::Range;

/// Number of pages needed for `count` items.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if count == 0 || page_size == 0 {
        0
    } else {
        count.div_ceil(page_size)
    }
}

/// Clamps an arbitrary requested page (zero, negative, too large) into range.
pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    let last = total_pages.max(1) as i64;
    requested.clamp(1, last) as usize
}

/// Index range of page `page` (1-indexed), clipped to `len`.
pub fn page_range(len: usize, page_size: usize, page: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// The records on page `page`. Empty if the page is past the end.
pub fn apply<T>(records: &[T], page_size: usize, page: usize) -> &[T] {
    &records[page_range(records.len(), page_size, page)]
}

/// Pagination state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Number of items per page
    page_size: usize,
    /// Current page number (1-indexed)
    current_page: usize,
    /// Number of items being paged over (the filtered count)
    total_items: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            total_items: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    /// Updates the item count, pulling the current page back into range if needed.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current_page = clamp_page(self.current_page as i64, self.total_pages());
    }

    /// Changes the page size and goes back to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Jumps to `page`, clamped into range.
    pub fn set_page(&mut self, page: i64) {
        self.current_page = clamp_page(page, self.total_pages());
    }

    /// Moves to the next page if available
    pub fn next_page(&mut self) -> bool {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Moves to the previous page if available
    pub fn prev_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }
}
