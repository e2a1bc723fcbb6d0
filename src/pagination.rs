//! Pagination contract shared by every list endpoint.
//!
//! Raw query parameters are normalized into a [`PageRequest`] before any
//! storage is touched; list payloads are wrapped into a [`PageResult`]. The
//! windowed SELECT and the COUNT behind `total` are separate round trips with
//! no snapshot isolation between them, so `total` may be stale relative to
//! the returned page under concurrent writes. Accepted property, not a bug.

use serde::Deserialize;

use crate::error::DomainError;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const DEFAULT_PAGE_INDEX: i64 = 0;

/// Raw `?page=&pageSize=` query parameters as they arrive.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
    pub page: Option<i64>,
}

/// A validated page window. Both fields are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Normalize raw parameters: absent values default to `pageSize=10`,
    /// `page=0`; negative values are rejected. No upper bound is enforced on
    /// the page size.
    pub fn parse(query: &PageQuery) -> Result<Self, DomainError> {
        let page_size = match query.page_size {
            None => DEFAULT_PAGE_SIZE,
            Some(size) if size < 0 => return Err(DomainError::BadPageSize),
            Some(size) => size,
        };

        let page = match query.page {
            None => DEFAULT_PAGE_INDEX,
            Some(index) if index < 0 => return Err(DomainError::BadPageIndex),
            Some(index) => index,
        };

        // The window's row offset must itself fit in i64; an index so large
        // that page * pageSize overflows is as invalid as a negative one.
        if page.checked_mul(page_size).is_none() {
            return Err(DomainError::BadPageIndex);
        }

        Ok(Self { page, page_size })
    }

    /// Row offset for the underlying windowed query. `parse` guarantees the
    /// product fits; saturation covers windows built by hand.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

/// One page of results plus the total count of active rows in scope.
#[derive(Debug)]
pub struct PageResult<T> {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub data: Vec<T>,
}

impl<T> PageResult<T> {
    pub fn new(data: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            page: request.page,
            page_size: request.page_size,
            total,
            data,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page_size: Option<i64>, page: Option<i64>) -> PageQuery {
        PageQuery { page_size, page }
    }

    #[test]
    fn absent_parameters_use_defaults() {
        let req = PageRequest::parse(&query(None, None)).unwrap();
        assert_eq!(req.page_size, 10);
        assert_eq!(req.page, 0);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn explicit_values_are_honored() {
        let req = PageRequest::parse(&query(Some(25), Some(3))).unwrap();
        assert_eq!(req.limit(), 25);
        assert_eq!(req.offset(), 75);
    }

    #[test]
    fn zero_is_a_valid_window() {
        let req = PageRequest::parse(&query(Some(0), Some(0))).unwrap();
        assert_eq!(req.limit(), 0);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn negative_page_size_is_rejected() {
        let err = PageRequest::parse(&query(Some(-1), None)).unwrap_err();
        assert!(matches!(err, DomainError::BadPageSize));
    }

    #[test]
    fn negative_page_index_is_rejected() {
        let err = PageRequest::parse(&query(None, Some(-7))).unwrap_err();
        assert!(matches!(err, DomainError::BadPageIndex));
    }

    #[test]
    fn overflowing_window_is_rejected_as_bad_page_index() {
        let err = PageRequest::parse(&query(Some(10), Some(i64::MAX / 2))).unwrap_err();
        assert!(matches!(err, DomainError::BadPageIndex));

        // The extreme corners stay rejected, not wrapped.
        let err = PageRequest::parse(&query(Some(i64::MAX), Some(2))).unwrap_err();
        assert!(matches!(err, DomainError::BadPageIndex));
    }

    #[test]
    fn hand_built_window_saturates_instead_of_wrapping() {
        let req = PageRequest {
            page: i64::MAX / 2,
            page_size: 10,
        };
        assert_eq!(req.offset(), i64::MAX);
    }

    #[test]
    fn page_size_is_validated_before_page_index() {
        let err = PageRequest::parse(&query(Some(-1), Some(-1))).unwrap_err();
        assert!(matches!(err, DomainError::BadPageSize));
    }

    #[test]
    fn window_past_the_end_is_empty_with_total_intact() {
        // 23 active rows, window [50, 60): OFFSET is past every row, the
        // SELECT comes back empty, and the COUNT still reports all of them.
        let req = PageRequest::parse(&query(Some(10), Some(5))).unwrap();
        let total = 23;
        assert!(req.offset() >= total);

        let result = PageResult::new(Vec::<&str>::new(), req, total);
        assert!(result.data.is_empty());
        assert_eq!(result.total, 23);
        assert_eq!(result.page, 5);
        assert_eq!(result.page_size, 10);
    }

    #[test]
    fn result_keeps_total_independent_of_window() {
        let req = PageRequest::parse(&query(Some(2), Some(5))).unwrap();
        let result = PageResult::new(vec!["a", "b"], req, 42);
        assert_eq!(result.total, 42);
        assert_eq!(result.page, 5);
        assert_eq!(result.page_size, 2);
        assert_eq!(result.data.len(), 2);
    }
}
