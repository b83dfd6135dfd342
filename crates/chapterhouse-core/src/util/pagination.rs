//! Offset pagination shared by the listing endpoints.

use serde::Serialize;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::{CoreError, CoreResult};

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE as usize,
        }
    }
}

impl PageRequest {
    /// ## Summary
    /// Builds a page request, clamping `limit` to the maximum page size.
    ///
    /// ## Errors
    /// Returns `CoreError::ValidationError` if `page` or `limit` is zero.
    pub fn new(page: usize, limit: usize) -> CoreResult<Self> {
        if page == 0 {
            return Err(CoreError::ValidationError(
                "page must be 1 or greater".to_string(),
            ));
        }
        if limit == 0 {
            return Err(CoreError::ValidationError(
                "limit must be 1 or greater".to_string(),
            ));
        }

        Ok(Self {
            page,
            limit: limit.min(MAX_PAGE_SIZE as usize),
        })
    }

    /// ## Summary
    /// Parses raw query-string values, falling back to defaults for absent or empty ones.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidInput` for non-numeric values and
    /// `CoreError::ValidationError` for zero values.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> CoreResult<Self> {
        let defaults = Self::default();
        let page = parse_number("page", page)?.unwrap_or(defaults.page);
        let limit = parse_number("limit", limit)?.unwrap_or(defaults.limit);
        Self::new(page, limit)
    }

    #[must_use]
    pub const fn page(self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn limit(self) -> usize {
        self.limit
    }

    #[must_use]
    pub const fn offset(self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Returns the part of `items` covered by this page; empty past the end.
    #[must_use]
    pub fn slice<T>(self, items: &[T]) -> &[T] {
        let start = self.offset().min(items.len());
        let end = start.saturating_add(self.limit).min(items.len());
        &items[start..end]
    }

    /// Describes this page relative to `total` items.
    #[must_use]
    pub const fn pagination(self, total: usize) -> Pagination {
        let total_pages = total.div_ceil(self.limit);
        Pagination {
            page: self.page,
            limit: self.limit,
            total,
            total_pages,
            has_next: self.page < total_pages,
            has_prev: self.page > 1,
        }
    }
}

fn parse_number(field: &str, raw: Option<&str>) -> CoreResult<Option<usize>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<usize>().map(Some).map_err(|_err| {
            CoreError::InvalidInput(format!("{field} must be a positive integer: '{value}'"))
        }),
    }
}

/// Pagination block returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}
