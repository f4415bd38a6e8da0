/// Fixed-size pagination over post candidate sets.
///
/// Every feed view pages by 10. Out-of-range page numbers clamp to the
/// nearest valid page instead of erroring; an empty candidate set
/// still has one (empty) page.
use serde::{Deserialize, Serialize};

pub const PAGE_SIZE: i64 = 10;

/// One page of an ordered candidate set, with paging metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: i64,
    pub total: i64,
    pub num_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, number: i64, total: i64) -> Self {
        let num_pages = num_pages(total);
        Self {
            items,
            number,
            total,
            num_pages,
            has_next: number < num_pages,
            has_previous: number > 1,
        }
    }
}

/// Query-string page parameter, `?page=N`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

pub fn num_pages(total: i64) -> i64 {
    if total <= 0 {
        1
    } else {
        (total + PAGE_SIZE - 1) / PAGE_SIZE
    }
}

/// Clamp a requested page number into the valid range for `total` items.
pub fn clamp_page(requested: Option<i64>, total: i64) -> i64 {
    requested.unwrap_or(1).clamp(1, num_pages(total))
}

pub fn offset(page: i64) -> i64 {
    (page - 1) * PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_has_one_page() {
        assert_eq!(num_pages(0), 1);
        assert_eq!(clamp_page(None, 0), 1);
        assert_eq!(clamp_page(Some(99), 0), 1);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(num_pages(10), 1);
        assert_eq!(num_pages(11), 2);
        assert_eq!(num_pages(21), 3);
    }

    #[test]
    fn out_of_range_pages_clamp() {
        // 25 items -> 3 pages
        assert_eq!(clamp_page(Some(0), 25), 1);
        assert_eq!(clamp_page(Some(-3), 25), 1);
        assert_eq!(clamp_page(Some(7), 25), 3);
        assert_eq!(clamp_page(Some(2), 25), 2);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(offset(1), 0);
        assert_eq!(offset(3), 20);
    }

    #[test]
    fn page_metadata() {
        let page = Page::new(vec![1, 2, 3], 2, 25);
        assert_eq!(page.num_pages, 3);
        assert!(page.has_next);
        assert!(page.has_previous);

        let last = Page::new(vec![4, 5], 3, 25);
        assert!(!last.has_next);
        assert!(last.has_previous);

        let only = Page::new(Vec::<i32>::new(), 1, 0);
        assert!(!only.has_next);
        assert!(!only.has_previous);
    }
}
