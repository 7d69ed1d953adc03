//! Token signing and verification with per-kind secrets and lifetimes.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use storefront_core::config::AuthConfig;
use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_entity::account::AccountProfile;

use super::claims::{AccessClaims, TokenKind};

/// Clock skew tolerated on `exp`.
const LEEWAY_SECONDS: u64 = 5;

/// Why a token failed verification.
///
/// Callers collapse every variant into one rejection; the variant is only
/// for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token is past its expiration.
    #[error("token has expired")]
    ExpiredToken,
    /// The token is not a well-formed token of the expected shape and kind.
    #[error("token is malformed")]
    MalformedToken,
    /// The signature does not match the secret for the requested kind.
    #[error("token signature is invalid")]
    InvalidSignature,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::ExpiredSignature => Self::ExpiredToken,
            JwtErrorKind::InvalidSignature => Self::InvalidSignature,
            _ => Self::MalformedToken,
        }
    }
}

/// A freshly signed token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The compact JWT string.
    pub token: String,
    /// The configured lifetime for this kind.
    pub ttl: Duration,
}

/// Keys and lifetime for one token kind.
#[derive(Clone)]
struct KindKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    lifetime: TimeDelta,
}

impl KindKeys {
    fn new(kind: TokenKind, secret: &str, ttl: Duration) -> AppResult<Self> {
        let lifetime = i64::try_from(ttl.as_secs())
            .ok()
            .and_then(TimeDelta::try_seconds)
            .filter(|lifetime| Utc::now().checked_add_signed(*lifetime).is_some())
            .ok_or_else(|| AppError::configuration(format!("{kind} token lifetime is too large")))?;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            lifetime,
        })
    }
}

/// Signs and verifies access and refresh tokens.
///
/// Stateless: verification checks signature, expiry, issuer, subject and
/// kind, and never consults the credential store.
#[derive(Clone)]
pub struct TokenIssuer {
    access: KindKeys,
    refresh: KindKeys,
    issuer: String,
    subject: String,
    validation: Validation,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("subject", &self.subject)
            .field("access_ttl", &self.access.ttl)
            .field("refresh_ttl", &self.refresh.ttl)
            .finish()
    }
}

impl TokenIssuer {
    /// Creates an issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = LEEWAY_SECONDS;
        validation.set_issuer(&[config.token_issuer.as_str()]);
        validation.sub = Some(config.token_subject.clone());
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Ok(Self {
            access: KindKeys::new(
                TokenKind::Access,
                &config.access_token_secret,
                config.access_ttl(),
            )?,
            refresh: KindKeys::new(
                TokenKind::Refresh,
                &config.refresh_token_secret,
                config.refresh_ttl(),
            )?,
            issuer: config.token_issuer.clone(),
            subject: config.token_subject.clone(),
            validation,
        })
    }

    /// Signs a token of the given kind carrying a snapshot of `profile`.
    pub fn issue(&self, profile: &AccountProfile, kind: TokenKind) -> AppResult<IssuedToken> {
        self.issue_at(profile, kind, Utc::now())
    }

    /// Signs a token as if issued at `now`.
    pub(crate) fn issue_at(
        &self,
        profile: &AccountProfile,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> AppResult<IssuedToken> {
        let keys = self.keys(kind);
        let expires_at = now
            .checked_add_signed(keys.lifetime)
            .ok_or_else(|| AppError::internal(format!("{kind} token expiry is out of range")))?;

        let claims = AccessClaims {
            profile: profile.clone(),
            sub: self.subject.clone(),
            iss: self.issuer.clone(),
            typ: kind,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
            .map_err(|e| AppError::internal(format!("Failed to encode {kind} token: {e}")))?;

        Ok(IssuedToken {
            token,
            ttl: keys.ttl,
        })
    }

    /// Verifies a token of the given kind and returns its claims.
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<AccessClaims, TokenError> {
        let data = decode::<AccessClaims>(token, &self.keys(kind).decoding, &self.validation)?;
        if data.claims.typ != kind {
            return Err(TokenError::MalformedToken);
        }
        Ok(data.claims)
    }

    fn keys(&self, kind: TokenKind) -> &KindKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }
}
