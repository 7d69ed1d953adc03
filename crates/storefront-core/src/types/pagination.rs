//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Page number (1-based).
    pub current: u64,
    /// Number of items per page.
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request, clamping out-of-range values.
    pub fn new(current: u64, page_size: u64) -> Self {
        Self {
            current: current.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Calculate the SQL `OFFSET` value, saturating at `u64::MAX`.
    pub fn offset(&self) -> u64 {
        self.current.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

/// Page metadata returned alongside list results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Current page number (1-based).
    pub current: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of pages.
    pub pages: u64,
    /// Total number of items across all pages.
    pub total: u64,
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T: Serialize> {
    /// Page metadata.
    pub meta: PageMeta,
    /// The items on this page.
    pub data: Vec<T>,
}

impl<T: Serialize> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            meta: PageMeta {
                current: request.current,
                page_size: request.page_size,
                pages: total.div_ceil(request.page_size),
                total,
            },
            data,
        }
    }
}
