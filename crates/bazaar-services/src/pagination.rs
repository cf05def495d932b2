use crate::ServiceError;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// One page cut out of a caller-owned list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// The page actually returned, after clamping. 0 when there are no pages.
    pub page_number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slices lists into fixed-size pages and filters them.
///
/// Holds nothing but the page size; every call is a pure function of its input.
#[derive(Debug, Clone, Copy)]
pub struct ProductPaginationService {
    page_size: usize,
}

impl Default for ProductPaginationService {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProductPaginationService {
    pub fn new(page_size: usize) -> Result<Self, ServiceError> {
        if page_size == 0 {
            return Err(ServiceError::InvalidArgument(
                "page size must be at least 1".to_string(),
            ));
        }
        Ok(Self { page_size })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Return page `page_number` (1-based) of `items`.
    ///
    /// A page number past the end is clamped to the last page rather than
    /// rejected. Page 0 is an error.
    pub fn paginate<T: Clone>(&self, items: &[T], page_number: usize) -> Result<Page<T>, ServiceError> {
        if page_number < 1 {
            return Err(ServiceError::InvalidArgument(format!(
                "page number must be at least 1, got {}",
                page_number
            )));
        }

        let total_items = items.len();
        let total_pages = total_items.div_ceil(self.page_size);
        if total_pages == 0 {
            return Ok(Page {
                items: Vec::new(),
                page_number: 0,
                total_pages: 0,
                total_items: 0,
            });
        }

        let page_number = page_number.min(total_pages);
        let start = (page_number - 1) * self.page_size;
        let end = (start + self.page_size).min(total_items);

        Ok(Page {
            items: items[start..end].to_vec(),
            page_number,
            total_pages,
            total_items,
        })
    }

    /// Items for which `predicate` holds, in their original order.
    pub fn filter<T, P>(&self, items: &[T], predicate: P) -> Vec<T>
    where
        T: Clone,
        P: Fn(&T) -> bool,
    {
        items.iter().filter(|item| predicate(item)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn empty_list_has_no_pages() {
        let pager = ProductPaginationService::default();
        let page = pager.paginate::<usize>(&[], 1).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_items, 0);
    }

    #[test]
    fn last_page_is_truncated() {
        let pager = ProductPaginationService::default();
        let items = numbers(45);

        let page = pager.paginate(&items, 3).unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, (40..45).collect::<Vec<_>>());

        let first = pager.paginate(&items, 1).unwrap();
        assert_eq!(first.items, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn page_past_the_end_is_clamped() {
        let pager = ProductPaginationService::default();
        let items = numbers(45);
        assert_eq!(
            pager.paginate(&items, 100).unwrap(),
            pager.paginate(&items, 3).unwrap()
        );
    }

    #[test]
    fn page_zero_is_rejected() {
        let pager = ProductPaginationService::default();
        assert!(matches!(
            pager.paginate(&numbers(5), 0),
            Err(ServiceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(matches!(
            ProductPaginationService::new(0),
            Err(ServiceError::InvalidArgument(_))
        ));
        assert_eq!(ProductPaginationService::new(7).unwrap().page_size(), 7);
    }

    #[test]
    fn pages_cover_every_item_exactly_once() {
        for size in 1..=7 {
            let pager = ProductPaginationService::new(size).unwrap();
            for n in 0..=30 {
                let items = numbers(n);
                let total_pages = n.div_ceil(size);
                let mut seen = Vec::new();
                for p in 1..=total_pages {
                    seen.extend(pager.paginate(&items, p).unwrap().items);
                }
                assert_eq!(seen, items, "size {} count {}", size, n);
            }
        }
    }

    #[test]
    fn filter_keeps_relative_order() {
        let pager = ProductPaginationService::default();
        let items = vec![5, 2, 8, 1, 9, 4];
        assert_eq!(pager.filter(&items, |n| *n > 3), vec![5, 8, 9, 4]);
        assert!(pager.filter(&items, |_| false).is_empty());
    }
}
