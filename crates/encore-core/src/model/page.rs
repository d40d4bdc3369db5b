use serde::{Deserialize, Serialize};

/// One page of a paged catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: u64,
    pub per_page: u64,
    /// Total documents across all pages.
    pub total: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Number of pages implied by `total` and `per_page`.
    pub fn page_count(&self) -> u64 {
        if self.per_page == 0 {
            return u64::from(!self.items.is_empty());
        }
        self.total.div_ceil(self.per_page)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: u64, per_page: u64, total: u64) -> Page<u8> {
        Page {
            page,
            per_page,
            total,
            items: vec![0],
        }
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page(1, 10, 31).page_count(), 4);
        assert_eq!(page(1, 10, 30).page_count(), 3);
    }

    #[test]
    fn last_page_has_no_next() {
        assert!(page(3, 10, 31).has_next());
        assert!(!page(4, 10, 31).has_next());
    }

    #[test]
    fn unknown_page_size_counts_single_page() {
        assert_eq!(page(1, 0, 0).page_count(), 1);
    }
}
