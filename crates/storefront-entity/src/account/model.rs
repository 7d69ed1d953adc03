//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::AccountRole;

/// A credential-store account.
///
/// Holds at most one refresh token: issuing a new one overwrites the old
/// value, and the stored value is the only refresh token that can be
/// exchanged.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login identifier (unique, stored lowercase).
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Shipping address.
    pub address: Option<String>,
    /// Avatar file name.
    pub avatar: Option<String>,
    /// Account role.
    pub role: AccountRole,
    /// The single refresh token currently accepted for this account.
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    /// Soft-delete flag; inactive accounts cannot log in or refresh.
    pub is_active: bool,
    /// The admin who created this account, if any.
    pub created_by: Option<Uuid>,
    /// The last account that changed the profile or re-activated it.
    pub updated_by: Option<Uuid>,
    /// The admin who deactivated this account.
    pub deleted_by: Option<Uuid>,
    /// When the account was deactivated.
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Builds a new active account from creation data.
    pub fn from_create(input: CreateAccount) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: normalize_email(&input.email),
            password_hash: input.password_hash,
            phone: input.phone,
            address: input.address,
            avatar: input.avatar,
            role: input.role,
            refresh_token: None,
            is_active: true,
            created_by: input.created_by,
            updated_by: None,
            deleted_by: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    /// Display name.
    pub name: String,
    /// Login identifier.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Shipping address.
    pub address: Option<String>,
    /// Avatar file name.
    pub avatar: Option<String>,
    /// Assigned role.
    pub role: AccountRole,
    /// Creating admin's account ID.
    pub created_by: Option<Uuid>,
}

/// Profile fields an account holder may change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccount {
    /// The account to update.
    pub id: Uuid,
    /// New display name.
    pub name: String,
    /// New phone.
    pub phone: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New avatar.
    pub avatar: Option<String>,
    /// The account making the change.
    pub updated_by: Option<Uuid>,
}

/// Canonical form of a login identifier.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
