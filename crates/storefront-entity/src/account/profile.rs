//! Public profile projection of an account.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Account;
use super::role::AccountRole;

/// The account fields that may leave the server: returned by login and
/// embedded into token claims. Never carries the password hash or the
/// stored refresh token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    /// Account identifier.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login identifier.
    pub email: String,
    /// Role at projection time.
    pub role: AccountRole,
    /// Avatar file name.
    pub avatar: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Shipping address.
    pub address: Option<String>,
}

impl From<&Account> for AccountProfile {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
            avatar: account.avatar.clone(),
            phone: account.phone.clone(),
            address: account.address.clone(),
        }
    }
}
