use serde::{Deserialize, Serialize};

// ============================================================================
// Pagination Engine
// ============================================================================
//
// Pages are 1-based. A page is the contiguous slice
// [(page_number - 1) * page_size, page_number * page_size) of the filtered,
// sorted superset, cut short at the end of the set. Page counts use exact
// integer ceiling division.
//
// ============================================================================

/// Page size used when the caller does not ask for one
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Largest page size a caller may ask for
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    #[error("page number must be at least 1")]
    PageNumberTooSmall,

    #[error("page size must be at least 1")]
    PageSizeTooSmall,

    #[error("page size must be at most {max} (got {requested})")]
    PageSizeTooLarge { requested: u32, max: u32 },
}

/// Validated page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
}

impl PageRequest {
    pub fn new(page_number: u32, page_size: u32) -> Result<Self, PaginationError> {
        if page_number == 0 {
            return Err(PaginationError::PageNumberTooSmall);
        }
        if page_size == 0 {
            return Err(PaginationError::PageSizeTooSmall);
        }
        Ok(Self { page_number, page_size })
    }

    /// Build a request from optional caller input, filling in defaults and
    /// enforcing `max_page_size`.
    pub fn from_parts(
        page_number: Option<u32>,
        page_size: Option<u32>,
        default_page_size: u32,
        max_page_size: u32,
    ) -> Result<Self, PaginationError> {
        let page_size = page_size.unwrap_or(default_page_size);
        if page_size > max_page_size {
            return Err(PaginationError::PageSizeTooLarge {
                requested: page_size,
                max: max_page_size,
            });
        }
        Self::new(page_number.unwrap_or(1), page_size)
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Zero-based index of the first item on this page, `None` on overflow
    pub fn offset(&self) -> Option<usize> {
        let page_index = usize::try_from(self.page_number - 1).ok()?;
        let page_size = usize::try_from(self.page_size).ok()?;
        page_index.checked_mul(page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of a larger result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> PagedResult<T> {
    pub fn has_previous_page(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next_page(&self) -> bool {
        usize::try_from(self.page_number).is_ok_and(|page| page < self.total_pages)
    }

    /// Convert the items, keeping the paging metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Number of pages needed for `total_items` at `page_size` per page
pub fn total_pages(total_items: usize, page_size: u32) -> usize {
    match usize::try_from(page_size) {
        Ok(0) => 0,
        Ok(size) => total_items.div_ceil(size),
        // page size wider than usize: everything fits on one page
        Err(_) => usize::from(total_items > 0),
    }
}

/// Slice `items` (already filtered and sorted) down to the requested page
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> PagedResult<T> {
    let total_items = items.len();
    let page_size = usize::try_from(request.page_size()).unwrap_or(usize::MAX);

    let page_items = match request.offset() {
        Some(offset) if offset < total_items => {
            items.into_iter().skip(offset).take(page_size).collect()
        }
        _ => Vec::new(),
    };

    PagedResult {
        items: page_items,
        page_number: request.page_number(),
        page_size: request.page_size(),
        total_items,
        total_pages: total_pages(total_items, request.page_size()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn page(n: usize, page_number: u32, page_size: u32) -> PagedResult<usize> {
        paginate((0..n).collect(), PageRequest::new(page_number, page_size).unwrap())
    }

    #[test]
    fn test_twenty_five_items_in_pages_of_twelve() {
        let first = page(25, 1, 12);
        let second = page(25, 2, 12);
        let third = page(25, 3, 12);

        assert_eq!(first.items, (0..12).collect::<Vec<_>>());
        assert_eq!(second.items, (12..24).collect::<Vec<_>>());
        assert_eq!(third.items, vec![24]);
        for p in [&first, &second, &third] {
            assert_eq!(p.total_pages, 3);
            assert_eq!(p.total_items, 25);
        }
    }

    #[test]
    fn test_exact_multiple_does_not_round_up() {
        let result = page(12, 1, 12);
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.items.len(), 12);
        assert!(!result.has_next_page());
    }

    #[test]
    fn test_empty_set() {
        let result = page(0, 1, 12);
        assert_eq!(result.total_pages, 0);
        assert!(result.items.is_empty());
        assert!(!result.has_next_page());
        assert!(!result.has_previous_page());
    }

    #[test]
    fn test_page_beyond_the_end() {
        let result = page(5, 100, 12);
        assert!(result.items.is_empty());
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.total_items, 5);
        assert_eq!(result.page_number, 100);
    }

    #[test]
    fn test_huge_page_number_does_not_overflow() {
        let result = page(5, u32::MAX, u32::MAX);
        assert!(result.items.is_empty());
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_large_counts_use_exact_ceiling() {
        // 2^53 + 1 is not representable as f64; float ceil would give 2^53
        let total = (1usize << 53) + 1;
        assert_eq!(total_pages(total, 1), total);
        assert_eq!(total_pages(usize::MAX, 2), usize::MAX / 2 + 1);
    }

    #[test]
    fn test_navigation_flags() {
        let middle = page(30, 2, 10);
        assert!(middle.has_previous_page());
        assert!(middle.has_next_page());

        let last = page(30, 3, 10);
        assert!(!last.has_next_page());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let mapped = page(25, 3, 12).map(|n| format!("#{n}"));
        assert_eq!(mapped.items, vec!["#24".to_string()]);
        assert_eq!(mapped.total_pages, 3);
        assert_eq!(mapped.page_number, 3);
    }

    #[test]
    fn test_request_defaults_and_validation() {
        let request = PageRequest::from_parts(None, None, DEFAULT_PAGE_SIZE, DEFAULT_MAX_PAGE_SIZE).unwrap();
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.page_size(), 12);

        assert_eq!(PageRequest::new(0, 12), Err(PaginationError::PageNumberTooSmall));
        assert_eq!(PageRequest::new(1, 0), Err(PaginationError::PageSizeTooSmall));
        assert_eq!(
            PageRequest::from_parts(Some(1), Some(101), 12, 100),
            Err(PaginationError::PageSizeTooLarge { requested: 101, max: 100 })
        );
    }

    proptest! {
        #[test]
        fn prop_page_is_the_contiguous_slice(n in 0usize..500, p in 1u32..60, s in 1u32..50) {
            let result = page(n, p, s);
            let start = (p as usize - 1) * s as usize;
            let end = (p as usize * s as usize).min(n);
            let expected: Vec<usize> = if start < n { (start..end).collect() } else { Vec::new() };

            prop_assert!(result.items.len() <= s as usize);
            prop_assert_eq!(result.items, expected);
            prop_assert_eq!(result.total_pages, (n + s as usize - 1) / s as usize);
        }

        #[test]
        fn prop_pages_cover_the_set_exactly_once(n in 0usize..300, s in 1u32..40) {
            let pages = total_pages(n, s);
            let mut seen = Vec::new();
            for p in 1..=pages as u32 {
                seen.extend(page(n, p, s).items);
            }
            prop_assert_eq!(seen, (0..n).collect::<Vec<_>>());
        }
    }
}
