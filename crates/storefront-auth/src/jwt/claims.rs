//! JWT claims structure used in access and refresh tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_entity::account::{AccountProfile, AccountRole};

/// Claims payload embedded in every token.
///
/// A denormalized snapshot of the account taken at issue time. It goes stale
/// when the account changes later; holders see the new values only after they
/// authenticate again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Account snapshot (`_id`, name, email, role, avatar, phone, address).
    #[serde(flatten)]
    pub profile: AccountProfile,
    /// Subject marker.
    pub sub: String,
    /// Issuer marker.
    pub iss: String,
    /// Which kind of token carries these claims.
    pub typ: TokenKind,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token ID.
    pub jti: Uuid,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived bearer token for API requests.
    Access,
    /// Long-lived token delivered as a cookie and exchanged for a new pair.
    Refresh,
}

impl AccessClaims {
    /// Returns the account ID.
    pub fn account_id(&self) -> Uuid {
        self.profile.id
    }

    /// Returns the role captured at issue time.
    pub fn role(&self) -> AccountRole {
        self.profile.role
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access => write!(f, "access"),
            Self::Refresh => write!(f, "refresh"),
        }
    }
}
