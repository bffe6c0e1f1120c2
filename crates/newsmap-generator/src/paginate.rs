//! Page slicing over content collections.

use newsmap_core::Collection;
use thiserror::Error;
use tracing::debug;

/// Pagination errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// The page number is not a positive integer.
    #[error("invalid page number: {0}")]
    InvalidPageNumber(String),

    /// The page number is past the last page.
    #[error("page {page} out of range (1..={total})")]
    PageOutOfRange { page: i64, total: usize },
}

/// Result type for pagination operations.
pub type Result<T> = std::result::Result<T, PageError>;

/// Parse a raw `?p=` query value into a page number.
pub fn parse_page(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| PageError::InvalidPageNumber(raw.to_string()))
}

/// Paginator over a borrowed collection.
///
/// An empty collection still has one (empty) page, so the first page of a feed
/// is always addressable.
#[derive(Debug)]
pub struct Paginator<'a, C> {
    collection: &'a C,
    per_page: usize,
}

impl<'a, C: Collection> Paginator<'a, C> {
    /// Create a paginator. A `per_page` of zero is treated as one.
    pub fn new(collection: &'a C, per_page: usize) -> Self {
        Self {
            collection,
            per_page: per_page.max(1),
        }
    }

    /// Total number of items.
    pub fn count(&self) -> usize {
        self.collection.count()
    }

    /// Total number of pages, at least one.
    pub fn num_pages(&self) -> usize {
        self.count().div_ceil(self.per_page).max(1)
    }

    /// Check that `number` is a valid 1-based page number.
    pub fn validate(&self, number: i64) -> Result<usize> {
        if number < 1 {
            return Err(PageError::InvalidPageNumber(number.to_string()));
        }

        let total = self.num_pages();
        match usize::try_from(number) {
            Ok(page) if page <= total => Ok(page),
            _ => Err(PageError::PageOutOfRange {
                page: number,
                total,
            }),
        }
    }

    /// Fetch the items on page `number`.
    pub fn page(&self, number: i64) -> Result<Vec<C::Item>> {
        let page = self.validate(number)?;
        let start = (page - 1) * self.per_page;
        let end = (start + self.per_page).min(self.count());

        debug!(page, start, end, "fetching page");
        Ok(self.collection.fetch(start..end))
    }
}

#[cfg(test)]
mod tests {
    use newsmap_core::{ContentItem, Item};

    use super::*;

    fn items(n: usize) -> Vec<Item> {
        (1..=n)
            .map(|i| Item::new().with("location", format!("/{i}")))
            .collect()
    }

    fn locations(page: &[Item]) -> Vec<String> {
        page.iter()
            .filter_map(|item| item.attribute("location"))
            .map(|v| v.to_string())
            .collect()
    }

    #[test]
    fn test_paginate() {
        let items = items(10);
        let paginator = Paginator::new(&items, 3);

        assert_eq!(paginator.num_pages(), 4);
        assert_eq!(locations(&paginator.page(1).unwrap()), vec!["/1", "/2", "/3"]);
        assert_eq!(locations(&paginator.page(2).unwrap()), vec!["/4", "/5", "/6"]);
        assert_eq!(locations(&paginator.page(4).unwrap()), vec!["/10"]);
    }

    #[test]
    fn test_page_is_stable_across_calls() {
        let items = items(7);
        let paginator = Paginator::new(&items, 2);

        assert_eq!(paginator.page(3).unwrap(), paginator.page(3).unwrap());
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let items = items(0);
        let paginator = Paginator::new(&items, 5);

        assert_eq!(paginator.num_pages(), 1);
        assert!(paginator.page(1).unwrap().is_empty());
        assert!(matches!(
            paginator.page(2),
            Err(PageError::PageOutOfRange { page: 2, total: 1 })
        ));
    }

    #[test]
    fn test_invalid_page_numbers() {
        let items = items(4);
        let paginator = Paginator::new(&items, 2);

        assert_eq!(
            paginator.page(0).unwrap_err(),
            PageError::InvalidPageNumber("0".to_string())
        );
        assert_eq!(
            paginator.page(-3).unwrap_err(),
            PageError::InvalidPageNumber("-3".to_string())
        );
        assert_eq!(
            paginator.page(3).unwrap_err(),
            PageError::PageOutOfRange { page: 3, total: 2 }
        );
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page("2"), Ok(2));
        assert_eq!(parse_page(" 5 "), Ok(5));
        assert_eq!(parse_page("-1"), Ok(-1));
        assert_eq!(
            parse_page("two"),
            Err(PageError::InvalidPageNumber("two".to_string()))
        );
        assert_eq!(
            parse_page("1.5"),
            Err(PageError::InvalidPageNumber("1.5".to_string()))
        );
    }

    #[test]
    fn test_exact_multiple() {
        let items = items(6);
        let paginator = Paginator::new(&items, 3);
        assert_eq!(paginator.num_pages(), 2);
        assert_eq!(paginator.count(), 6);
        assert_eq!(locations(&paginator.page(2).unwrap()), vec!["/4", "/5", "/6"]);
    }
}
