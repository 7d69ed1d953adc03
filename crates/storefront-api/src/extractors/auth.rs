//! `AuthUser` extractor: the identity resolved by the gate middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use storefront_auth::gate::Identity;
use storefront_core::error::AppError;

use crate::error::ApiError;

/// Authenticated caller available in handlers of non-public routes.
///
/// The gate middleware inserts the [`Identity`] into request extensions
/// after both gates pass; this extractor only reads it back.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    /// Returns the inner identity.
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Identity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError(AppError::unauthorized("Missing access token")))
    }
}
