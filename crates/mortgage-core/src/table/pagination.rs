//! Page arithmetic shared by the query state and its views.

/// Most page-number buttons shown at once.
pub const PAGE_WINDOW: usize = 5;

/// Number of pages needed for `row_count` rows; an empty set still has one page.
pub fn total_pages(row_count: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    row_count.div_ceil(size).max(1)
}

/// Clamp a requested page into `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Half-open index range of the rows on `page`, bounded by `row_count`.
pub fn page_bounds(page: usize, page_size: usize, row_count: usize) -> (usize, usize) {
    let size = page_size.max(1);
    let start = (page.max(1) - 1).saturating_mul(size).min(row_count);
    let end = start.saturating_add(size).min(row_count);
    (start, end)
}

/// 1-based inclusive display range ("Showing 21 to 30 of 30"); `(0, 0)` when empty.
pub fn display_range(start: usize, end: usize) -> (usize, usize) {
    if end <= start {
        (0, 0)
    } else {
        (start + 1, end)
    }
}

/// Page numbers to offer as buttons: up to five, centred on `current` where
/// the ends allow it.
pub fn page_window(current: usize, total_pages: usize) -> Vec<usize> {
    let total = total_pages.max(1);
    let current = clamp_page(current, total);

    let mut first = current.saturating_sub(2).max(1);
    let last = (first + PAGE_WINDOW - 1).min(total);
    if last - first < PAGE_WINDOW - 1 && first > 1 {
        first = last.saturating_sub(PAGE_WINDOW - 1).max(1);
    }

    (first..=last).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(31, 10), 4);
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(99, 3), 3);
        assert_eq!(clamp_page(4, 0), 1);
    }

    #[test]
    fn test_page_bounds() {
        assert_eq!(page_bounds(3, 10, 30), (20, 30));
        assert_eq!(page_bounds(3, 10, 25), (20, 25));
        assert_eq!(page_bounds(1, 10, 0), (0, 0));
    }

    #[test]
    fn test_display_range() {
        assert_eq!(display_range(20, 30), (21, 30));
        assert_eq!(display_range(0, 0), (0, 0));
    }

    #[test]
    fn test_page_window_start() {
        assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(2, 10), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_page_window_middle() {
        assert_eq!(page_window(6, 10), vec![4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_page_window_end() {
        assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(9, 10), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_page_window_few_pages() {
        assert_eq!(page_window(1, 2), vec![1, 2]);
        assert_eq!(page_window(1, 1), vec![1]);
    }
}
