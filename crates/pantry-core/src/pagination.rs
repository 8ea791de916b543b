// ABOUTME: Offset pagination values shared by every paginated search path
// ABOUTME: Normalizes page requests to defaults and derives total page counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::pagination::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

/// A normalized page request
///
/// Both fields are always at least 1. Invalid input never fails; it falls
/// back to page 1 with 10 items per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// One-based page number
    pub page: i64,
    /// Items per page
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a request, replacing missing or non-positive values with defaults
    #[must_use]
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE),
            page_size: page_size.filter(|s| *s >= 1).unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    /// Build a request from raw query-string values
    ///
    /// Unparseable values are treated as missing.
    #[must_use]
    pub fn from_query(page: Option<&str>, page_size: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|v| v.trim().parse::<i64>().ok());
        Self::new(parse(page), parse(page_size))
    }

    /// Rows to skip
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Rows to return
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.page_size
    }
}

/// Pagination metadata describing the path actually used for a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// One-based page number
    pub page: i64,
    /// Items per page
    pub page_size: i64,
    /// Total matching items across all pages
    pub total_items: i64,
    /// `ceil(total_items / page_size)`
    pub total_pages: i64,
}

impl Pagination {
    /// Derive metadata for `request` over `total_items` matches
    #[must_use]
    pub const fn new(request: PageRequest, total_items: i64) -> Self {
        let total_pages = if total_items <= 0 {
            0
        } else {
            let whole = total_items / request.page_size;
            if total_items % request.page_size == 0 {
                whole
            } else {
                whole + 1
            }
        };
        Self {
            page: request.page,
            page_size: request.page_size,
            total_items,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        assert_eq!(PageRequest::new(Some(0), Some(0)), PageRequest::default());
        assert_eq!(PageRequest::new(Some(-3), None), PageRequest::default());
        assert_eq!(PageRequest::new(None, Some(-1)).page_size, 10);
    }

    #[test]
    fn test_large_page_size_is_kept() {
        let request = PageRequest::new(Some(2), Some(500));
        assert_eq!(request.page_size, 500);
        assert_eq!(request.offset(), 500);
    }

    #[test]
    fn test_from_query_parsing() {
        let request = PageRequest::from_query(Some("3"), Some(" 20 "));
        assert_eq!(request.page, 3);
        assert_eq!(request.page_size, 20);

        let request = PageRequest::from_query(Some("abc"), Some(""));
        assert_eq!(request, PageRequest::default());
    }

    #[test]
    fn test_offset_and_limit() {
        let request = PageRequest::new(Some(2), Some(5));
        assert_eq!(request.offset(), 5);
        assert_eq!(request.limit(), 5);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let request = PageRequest::new(Some(2), Some(5));
        assert_eq!(Pagination::new(request, 12).total_pages, 3);
        assert_eq!(Pagination::new(request, 10).total_pages, 2);
        assert_eq!(Pagination::new(request, 1).total_pages, 1);
    }

    #[test]
    fn test_total_pages_with_maximal_page_size() {
        let request = PageRequest::new(Some(1), Some(i64::MAX));
        assert_eq!(Pagination::new(request, 2).total_pages, 1);
        assert_eq!(Pagination::new(request, i64::MAX).total_pages, 1);
        assert_eq!(request.offset(), 0);

        let deep = PageRequest::new(Some(i64::MAX), Some(i64::MAX));
        assert_eq!(deep.offset(), i64::MAX);
    }

    #[test]
    fn test_empty_result_has_zero_pages() {
        let pagination = Pagination::new(PageRequest::default(), 0);
        assert_eq!(pagination.total_items, 0);
        assert_eq!(pagination.total_pages, 0);
        assert_eq!(pagination.page, 1);
    }
}
