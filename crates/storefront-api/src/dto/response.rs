//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_core::types::PageMeta;
use storefront_entity::account::{Account, AccountProfile, AccountRole};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Short description of the outcome.
    pub message: String,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Login and refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer access token.
    pub access_token: String,
    /// Public account projection.
    pub user: AccountProfile,
}

/// Minimal result of registration or admin creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedAccountResponse {
    /// New account ID.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

impl From<&Account> for CreatedAccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
        }
    }
}

/// Account details for admin and lookup endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Account ID.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login identifier.
    pub email: String,
    /// Role.
    pub role: AccountRole,
    /// Contact phone.
    pub phone: Option<String>,
    /// Shipping address.
    pub address: Option<String>,
    /// Avatar file name.
    pub avatar: Option<String>,
    /// Soft-delete flag.
    pub is_active: bool,
    /// Creating admin.
    pub created_by: Option<Uuid>,
    /// Last account to change the profile or reactivate it.
    pub updated_by: Option<Uuid>,
    /// Admin who deactivated the account.
    pub deleted_by: Option<Uuid>,
    /// When the account was deactivated.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            role: account.role,
            phone: account.phone,
            address: account.address,
            avatar: account.avatar,
            is_active: account.is_active,
            created_by: account.created_by,
            updated_by: account.updated_by,
            deleted_by: account.deleted_by,
            deleted_at: account.deleted_at,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Result of a bulk creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkCreateResponse {
    /// Accounts inserted.
    pub success: usize,
    /// Entries not inserted.
    pub fail: usize,
}

/// One page of accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountPageResponse {
    /// Page metadata.
    pub meta: PageMeta,
    /// Accounts on this page.
    pub result: Vec<AccountResponse>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Whether the credential store answered.
    pub store: bool,
}
