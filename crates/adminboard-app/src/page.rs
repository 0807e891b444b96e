// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// 1-based page position. A size of 0 means "no paging".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageCursor {
    pub number: usize,
    pub size: usize,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

impl PageCursor {
    pub const fn first(size: usize) -> Self {
        Self { number: 1, size }
    }

    pub const fn unpaged() -> Self {
        Self::first(0)
    }

    pub const fn is_paged(self) -> bool {
        self.size > 0
    }

    pub fn rewind(&mut self) {
        self.number = 1;
    }

    /// No-op on the last page.
    pub fn advance(&mut self, total_pages: usize) -> bool {
        if self.number < total_pages {
            self.number += 1;
            true
        } else {
            false
        }
    }

    /// No-op on the first page.
    pub fn retreat(&mut self) -> bool {
        if self.number > 1 {
            self.number -= 1;
            true
        } else {
            false
        }
    }

    /// Pulls the cursor back inside `1..=total_pages`.
    pub fn clamp(&mut self, total_pages: usize) {
        self.number = self.number.clamp(1, total_pages.max(1));
    }
}

pub fn total_pages(total_records: usize, page_size: usize) -> usize {
    match (total_records, page_size) {
        (0, _) => 0,
        (_, 0) => 1,
        (total, size) => total.div_ceil(size),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<T> {
    pub records: Vec<T>,
    pub page_number: usize,
    pub page_size: usize,
    pub total_records: usize,
    pub total_pages: usize,
}

impl<T> Default for PageView<T> {
    fn default() -> Self {
        Self::empty(DEFAULT_PAGE_SIZE)
    }
}

impl<T> PageView<T> {
    /// What a view shows after a failed load: nothing, and no pages.
    pub fn empty(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            page_number: 1,
            page_size,
            total_records: 0,
            total_pages: 0,
        }
    }

    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn is_first_page(&self) -> bool {
        self.page_number <= 1
    }

    pub fn is_last_page(&self) -> bool {
        self.page_number >= self.total_pages
    }
}

/// Slices one page out of `items`. A page past the end is empty rather
/// than an error.
pub fn paginate<T: Clone>(items: &[T], cursor: PageCursor) -> PageView<T> {
    let total_records = items.len();
    let page_number = cursor.number.max(1);
    let records = if cursor.is_paged() {
        let start = (page_number - 1).saturating_mul(cursor.size);
        let end = start.saturating_add(cursor.size).min(total_records);
        items.get(start..end).map(<[T]>::to_vec).unwrap_or_default()
    } else {
        items.to_vec()
    };

    PageView {
        records,
        page_number,
        page_size: if cursor.is_paged() {
            cursor.size
        } else {
            total_records
        },
        total_records,
        total_pages: total_pages(total_records, cursor.size),
    }
}

#[cfg(test)]
mod tests {
    use super::{PageCursor, PageView, paginate, total_pages};

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 1);
    }

    #[test]
    fn paginate_slices_the_requested_page() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(&items, PageCursor { number: 3, size: 10 });
        assert_eq!(page.records, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total_records, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.is_last_page());
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let items = vec!['a', 'b'];
        let page = paginate(&items, PageCursor { number: 4, size: 2 });
        assert!(page.records.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn unpaged_cursor_returns_everything() {
        let items = vec![1, 2, 3];
        let page = paginate(&items, PageCursor::unpaged());
        assert_eq!(page.records, items);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_size, 3);
    }

    #[test]
    fn cursor_stops_at_bounds() {
        let mut cursor = PageCursor::first(10);
        assert!(!cursor.retreat());
        assert_eq!(cursor.number, 1);

        assert!(cursor.advance(2));
        assert!(!cursor.advance(2));
        assert_eq!(cursor.number, 2);

        assert!(cursor.retreat());
        assert_eq!(cursor.number, 1);
    }

    #[test]
    fn clamp_pulls_cursor_into_range() {
        let mut cursor = PageCursor { number: 9, size: 10 };
        cursor.clamp(3);
        assert_eq!(cursor.number, 3);
        cursor.clamp(0);
        assert_eq!(cursor.number, 1);
    }

    #[test]
    fn empty_view_has_no_pages() {
        let view: PageView<u8> = PageView::empty(10);
        assert!(!view.has_records());
        assert_eq!(view.total_records, 0);
        assert_eq!(view.total_pages, 0);
    }
}
