//! Typed path parameter helpers.

use uuid::Uuid;

use storefront_core::error::AppError;

/// Parses an account ID from a path segment.
pub fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::validation(format!("Invalid account id: {s}")))
}
