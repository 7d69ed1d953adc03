//! Token signing, verification, and claims.

pub mod claims;
pub mod issuer;

pub use claims::{AccessClaims, TokenKind};
pub use issuer::{IssuedToken, TokenError, TokenIssuer};
