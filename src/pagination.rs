//! This module defines the common functionality for paging data.
//!
//! Pages are 1-indexed and all page math uses exact integer arithmetic.

use serde::{Deserialize, Serialize};

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of transactions per page when not specified in a request.
    pub default_page_size: u64,
    /// The largest page size a request may ask for.
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

/// A request for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    /// The 1-indexed page number.
    pub page: u64,
    /// The number of items per page.
    pub page_size: u64,
}

impl PageQuery {
    /// Create a page query.
    ///
    /// Pages are 1-indexed, so `page` is clamped up to 1 and `page_size` is
    /// clamped into `1..=max_page_size` of the given config.
    pub fn new(page: u64, page_size: u64, config: &PaginationConfig) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, config.max_page_size),
        }
    }

    /// The number of rows to skip to reach this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.page_size
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        let config = PaginationConfig::default();

        Self {
            page: config.default_page,
            page_size: config.default_page_size,
        }
    }
}

/// Metadata describing where a page sits within the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// The 1-indexed page number.
    pub page: u64,
    /// The number of items per page.
    pub page_size: u64,
    /// The total number of items across all pages.
    pub total: u64,
    /// The total number of pages.
    pub total_pages: u64,
    /// Whether there are more items after this page.
    pub has_more: bool,
}

impl PageInfo {
    /// Describe the page `query` of a result set with `total` items.
    pub fn new(query: PageQuery, total: u64) -> Self {
        Self {
            page: query.page,
            page_size: query.page_size,
            total,
            total_pages: total.div_ceil(query.page_size),
            has_more: query.page * query.page_size < total,
        }
    }
}
