//! Offset/limit pagination for book listings

use serde::Deserialize;

/// Maximum items per page
const MAX_PER_PAGE: u32 = 100;

/// Default items per page when only `page` is given
const DEFAULT_PER_PAGE: u32 = 20;

/// A bounded window over the id-ordered book set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page (max 100)
    pub per_page: u32,
}

impl Pagination {
    /// Create pagination with clamping.
    ///
    /// - Page is clamped to minimum of 1
    /// - Per page is clamped to 1..=100
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> u32 {
        self.per_page
    }
}

/// Query parameters for `GET /books`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PaginationParams {
    /// `None` when neither parameter was supplied, meaning "the whole set".
    pub fn into_pagination(self) -> Option<Pagination> {
        match (self.page, self.per_page) {
            (None, None) => None,
            (page, per_page) => Some(Pagination::new(
                page.unwrap_or(1),
                per_page.unwrap_or(DEFAULT_PER_PAGE),
            )),
        }
    }
}
