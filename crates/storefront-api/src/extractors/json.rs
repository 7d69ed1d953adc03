//! `ValidatedJson` extractor: JSON body plus `validator` rules.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

use storefront_core::error::AppError;

use crate::dto::request::validate_request;
use crate::error::ApiError;

/// JSON request body that has passed its `validator` rules.
///
/// Malformed JSON, a wrong content type and missing or mistyped fields all
/// surface as the uniform `Validation` error instead of axum's plain-text
/// rejection.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(
                    status = %rejection.status(),
                    detail = %rejection.body_text(),
                    "Rejected request body"
                );
                ApiError(AppError::validation("Invalid request body"))
            })?;

        validate_request(&value)?;
        Ok(Self(value))
    }
}
