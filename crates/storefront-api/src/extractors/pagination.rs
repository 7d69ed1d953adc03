//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use storefront_core::error::AppError;
use storefront_core::types::PageRequest;

/// Query parameters for paginated endpoints (`?current=1&pageSize=10`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (1-based).
    pub current: Option<u64>,
    /// Items per page (max: 100).
    pub page_size: Option<u64>,
}

impl PaginationParams {
    /// Converts to a `PageRequest`. Both parameters are required.
    pub fn into_page_request(self) -> Result<PageRequest, AppError> {
        match (self.current, self.page_size) {
            (Some(current), Some(page_size)) => Ok(PageRequest::new(current, page_size)),
            _ => Err(AppError::validation(
                "Query parameters 'current' and 'pageSize' are required",
            )),
        }
    }
}
