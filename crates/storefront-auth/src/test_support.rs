//! Shared fixtures for unit tests.

use uuid::Uuid;

use storefront_core::config::AuthConfig;
use storefront_entity::account::{AccountProfile, AccountRole};

/// Auth configuration with cheap hashing and no settle delay.
pub(crate) fn auth_config() -> AuthConfig {
    serde_json::from_value(serde_json::json!({
        "access_token_secret": "access-secret-for-tests",
        "access_token_ttl_seconds": 900,
        "refresh_token_secret": "refresh-secret-for-tests",
        "refresh_token_ttl_seconds": 86400,
        "settle_delay_ms": 0,
        "hash_memory_kib": 256,
        "hash_iterations": 1,
        "hash_parallelism": 1,
    }))
    .expect("valid test auth config")
}

pub(crate) fn profile(role: AccountRole) -> AccountProfile {
    AccountProfile {
        id: Uuid::new_v4(),
        name: "Test Account".to_string(),
        email: "test@shop.test".to_string(),
        role,
        avatar: Some("default-avatar.jpg".to_string()),
        phone: None,
        address: None,
    }
}
