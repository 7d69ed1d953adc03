//! Authentication configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Token, cookie and credential configuration.
///
/// The two secrets and the two lifetimes are required: there is no
/// fallback value, so a deployment without them refuses to start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret for access tokens.
    pub access_token_secret: String,
    /// Access token lifetime in seconds.
    pub access_token_ttl_seconds: u64,
    /// HMAC-SHA256 secret for refresh tokens.
    pub refresh_token_secret: String,
    /// Refresh token lifetime in seconds.
    pub refresh_token_ttl_seconds: u64,
    /// Issuer marker embedded in every token.
    #[serde(default = "default_issuer")]
    pub token_issuer: String,
    /// Subject marker embedded in every token.
    #[serde(default = "default_subject")]
    pub token_subject: String,
    /// Fixed wait applied after login and logout side effects.
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
    /// Name of the http-only refresh token cookie.
    #[serde(default = "default_cookie_name")]
    pub refresh_cookie_name: String,
    /// Whether the refresh cookie carries the `Secure` attribute.
    #[serde(default)]
    pub refresh_cookie_secure: bool,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Avatar assigned to newly created accounts.
    #[serde(default = "default_avatar")]
    pub default_avatar: String,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_hash_memory")]
    pub hash_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
    /// Argon2 parallelism.
    #[serde(default = "default_hash_parallelism")]
    pub hash_parallelism: u32,
}

impl AuthConfig {
    /// Rejects empty secrets and zero lifetimes.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.access_token_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.access_token_secret is empty"));
        }
        if self.refresh_token_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.refresh_token_secret is empty"));
        }
        if self.access_token_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "auth.access_token_ttl_seconds must be greater than zero",
            ));
        }
        if self.refresh_token_ttl_seconds == 0 {
            return Err(AppError::configuration(
                "auth.refresh_token_ttl_seconds must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Access token lifetime.
    pub fn access_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_ttl_seconds)
    }

    /// Refresh token lifetime.
    pub fn refresh_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_token_ttl_seconds)
    }

    /// Settle delay as a [`Duration`].
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

fn default_issuer() -> String {
    "server".to_string()
}

fn default_subject() -> String {
    "token".to_string()
}

fn default_settle_delay() -> u64 {
    2000
}

fn default_cookie_name() -> String {
    "refresh_token".to_string()
}

fn default_password_min() -> usize {
    6
}

fn default_avatar() -> String {
    "default-avatar.jpg".to_string()
}

fn default_hash_memory() -> u32 {
    19 * 1024
}

fn default_hash_iterations() -> u32 {
    2
}

fn default_hash_parallelism() -> u32 {
    1
}
