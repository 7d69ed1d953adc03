//! Authentication gate: bearer token to resolved identity.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_entity::account::{AccountProfile, AccountRole};

use crate::jwt::{AccessClaims, TokenIssuer, TokenKind};

/// The caller resolved from a verified access token.
///
/// A point-in-time snapshot of the claims; role changes or deactivation made
/// after the token was issued are not visible here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    claims: AccessClaims,
}

impl Identity {
    /// Wraps verified claims.
    pub fn new(claims: AccessClaims) -> Self {
        Self { claims }
    }

    /// Account ID.
    pub fn account_id(&self) -> Uuid {
        self.claims.account_id()
    }

    /// Role at issue time.
    pub fn role(&self) -> AccountRole {
        self.claims.role()
    }

    /// Profile snapshot.
    pub fn profile(&self) -> &AccountProfile {
        &self.claims.profile
    }
}

/// Verifies access tokens presented on protected routes.
#[derive(Debug, Clone)]
pub struct AuthenticationGate {
    issuer: Arc<TokenIssuer>,
}

impl AuthenticationGate {
    /// Creates a gate that verifies with the given issuer.
    pub fn new(issuer: Arc<TokenIssuer>) -> Self {
        Self { issuer }
    }

    /// Resolves the identity behind a bearer token.
    ///
    /// Fails with `Unauthorized` when the token is missing or does not verify
    /// as an access token. The specific verification failure is only logged.
    pub fn authenticate(&self, bearer: Option<&str>) -> Result<Identity, AppError> {
        let token = bearer
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::unauthorized("Missing access token"))?;

        let claims = self
            .issuer
            .verify(token, TokenKind::Access)
            .map_err(|e| {
                debug!(reason = %e, "Access token rejected");
                AppError::unauthorized("Invalid access token")
            })?;

        Ok(Identity::new(claims))
    }
}
