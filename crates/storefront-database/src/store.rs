//! Credential store trait for pluggable account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use storefront_core::result::AppResult;
use storefront_core::types::{PageRequest, PageResponse};
use storefront_entity::account::{Account, CreateAccount, UpdateAccount};

/// Account persistence used by the session manager and account service.
///
/// Every method is a single-document read or update. Implementations map
/// their own failures to `AppError` of kind `Database`, except where a
/// method documents a caller-facing kind.
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find an account by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// Find an account by login identifier (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Find the account whose stored refresh token equals `token`.
    async fn find_by_refresh_token(&self, token: &str) -> AppResult<Option<Account>>;

    /// List accounts, newest first.
    async fn list(&self, page: PageRequest) -> AppResult<PageResponse<Account>>;

    /// Insert a new account. Fails with `AlreadyExists` if the email is taken.
    async fn create(&self, input: CreateAccount) -> AppResult<Account>;

    /// Insert several accounts, skipping any whose email is already taken.
    ///
    /// Returns the accounts actually inserted, in input order.
    async fn insert_many(&self, inputs: Vec<CreateAccount>) -> AppResult<Vec<Account>>;

    /// Overwrite profile fields and record `updated_by`. Returns `false` if
    /// the account does not exist.
    async fn update_profile(&self, input: &UpdateAccount) -> AppResult<bool>;

    /// Unconditionally overwrite (or clear) the stored refresh token.
    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> AppResult<bool>;

    /// Replace the stored refresh token only if it still equals `expected`.
    ///
    /// Returns `false` when another writer got there first; exactly one of
    /// several concurrent swaps with the same `expected` value succeeds.
    async fn swap_refresh_token(&self, id: Uuid, expected: &str, next: &str) -> AppResult<bool>;

    /// Soft-delete: clear the active flag and the stored refresh token, and
    /// record `deleted_by` / `deleted_at`.
    async fn deactivate(&self, id: Uuid, by: Uuid) -> AppResult<bool>;

    /// Set the active flag, clear the deletion stamp and record `updated_by`.
    async fn activate(&self, id: Uuid, by: Uuid) -> AppResult<bool>;

    /// Replace the password hash.
    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> AppResult<bool>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
