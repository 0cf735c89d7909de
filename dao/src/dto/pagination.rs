pub const DEFAULT_PAGE_SIZE: usize = 20;

/// 1-based page window over a filtered list.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pagination {
    page: usize,
    limit: usize,
}

impl Pagination {
    pub fn new(page: &Option<usize>, limit: &Option<usize>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1),
        }
    }

    pub fn page(&self) -> &usize {
        &self.page
    }

    pub fn limit(&self) -> &usize {
        &self.limit
    }

    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn total_pages(&self, total: &usize) -> usize {
        total.div_ceil(self.limit)
    }

    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .skip(self.offset())
            .take(self.limit)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_are_one_based_and_clamped() {
        let p = Pagination::new(&Some(0), &Some(0));
        assert_eq!((*p.page(), *p.limit()), (1, 1));
        let p = Pagination::new(&None, &None);
        assert_eq!(*p.limit(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn apply_slices_the_window() {
        let items = (1..=7).collect::<Vec<_>>();
        let p = Pagination::new(&Some(2), &Some(3));
        assert_eq!(p.apply(&items), vec![4, 5, 6]);
        assert_eq!(p.total_pages(&items.len()), 3);
        assert!(Pagination::new(&Some(4), &Some(3)).apply(&items).is_empty());
    }
}
