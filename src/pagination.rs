//! Pager links for paginated listings.
//!
//! The backend numbers pages from zero; the pager shows and links 1-based
//! page numbers.

use serde::Serialize;

/// Page numbers to show, with `None` standing for an ellipsis.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    /// 1-based page shown as current.
    pub page: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Paginated<T> {
    /// Builds the pager from a zero-based backend page index.
    pub fn from_zero_based(items: Vec<T>, page_index: usize, total_pages: usize) -> Self {
        let total_pages = total_pages.max(1);
        let page = (page_index + 1).min(total_pages);

        Self {
            items,
            pages: get_pages(total_pages, page, 1, 2, 2, 1),
            page,
            total_pages,
            has_previous: page > 1,
            has_next: page < total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_page_has_no_neighbours() {
        let pager = Paginated::from_zero_based(vec![1, 2, 3], 0, 0);
        assert_eq!(pager.pages, vec![Some(1)]);
        assert_eq!(pager.page, 1);
        assert!(!pager.has_previous);
        assert!(!pager.has_next);
    }

    #[test]
    fn long_ranges_collapse_into_ellipses() {
        let pager = Paginated::from_zero_based(Vec::<u8>::new(), 9, 20);
        assert_eq!(
            pager.pages,
            vec![
                Some(1),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                None,
                Some(20)
            ]
        );
        assert!(pager.has_previous);
        assert!(pager.has_next);
    }

    #[test]
    fn out_of_range_index_is_clamped_to_last_page() {
        let pager = Paginated::from_zero_based(Vec::<u8>::new(), 7, 3);
        assert_eq!(pager.page, 3);
        assert_eq!(pager.pages, vec![Some(1), Some(2), Some(3)]);
        assert!(!pager.has_next);
    }
}
