//! # storefront-auth
//!
//! Credential and session lifecycle plus the request gates for Storefront.
//!
//! ## Modules
//!
//! - `jwt`: access/refresh token signing and verification
//! - `password`: Argon2id password hashing and policy enforcement
//! - `session`: login, refresh-token rotation, logout and register
//! - `gate`: route requirements, authentication and authorization gates

pub mod gate;
pub mod jwt;
pub mod password;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use gate::{AuthenticationGate, Identity, RequestAccess, RouteRequirement, RouteTable};
pub use jwt::{AccessClaims, TokenError, TokenIssuer, TokenKind};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{RefreshCookie, RegisterAccount, SessionGrant, SessionManager};
