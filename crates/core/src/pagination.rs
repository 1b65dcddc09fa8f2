//! Page requests and list metadata.
//!
//! Pages are 1-based. A [`PageRequest`] is always within bounds once
//! constructed, so the query layer can turn it into `LIMIT`/`OFFSET` without
//! re-checking.

use serde::Serialize;

use crate::error::{CoreError, FieldErrors};

/// Page used when the client does not ask for one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page number accepted.
pub const MAX_PAGE: i64 = 10_000_000;

/// Largest page size accepted.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated (page, page size) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
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
    /// Build a page request, substituting defaults for absent values.
    ///
    /// Values outside `[1, MAX_PAGE]` / `[1, MAX_PAGE_SIZE]` are a validation
    /// failure rather than being clamped.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Result<Self, CoreError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        let mut errors = FieldErrors::new();
        if !(1..=MAX_PAGE).contains(&page) {
            errors.insert("page".into(), format!("must be between 1 and {MAX_PAGE}"));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            errors.insert(
                "page_size".into(),
                format!("must be between 1 and {MAX_PAGE_SIZE}"),
            );
        }
        if !errors.is_empty() {
            return Err(CoreError::Validation(errors));
        }

        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Pagination metadata returned alongside every list response.
///
/// The all-zero value means "no results".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub current_page: i64,
    pub page_size: i64,
    pub first_page: i64,
    pub last_page: i64,
    pub total_records: i64,
}

/// Derive list metadata from the filtered total and the requested page.
pub fn calculate_metadata(total_records: i64, page: i64, page_size: i64) -> Metadata {
    if total_records <= 0 || page_size <= 0 {
        return Metadata::default();
    }

    Metadata {
        current_page: page,
        page_size,
        first_page: 1,
        last_page: (total_records + page_size - 1) / page_size,
        total_records,
    }
}
