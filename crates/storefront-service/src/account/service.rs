//! Account management: admin creation, listing, status changes, profile and password updates.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use storefront_auth::gate::Identity;
use storefront_auth::password::{PasswordHasher, PasswordValidator};
use storefront_core::config::{AccountsConfig, AuthConfig};
use storefront_core::error::AppError;
use storefront_core::types::{PageRequest, PageResponse};
use storefront_database::CredentialStore;
use storefront_entity::account::{
    Account, AccountRole, CreateAccount, UpdateAccount, normalize_email,
};

/// Account fields supplied by an admin creating an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Display name.
    pub name: String,
    /// Login identifier.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Shipping address.
    pub address: Option<String>,
}

/// Counts from a bulk creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Accounts inserted.
    pub success: usize,
    /// Submitted entries that were not inserted.
    pub fail: usize,
}

/// Handles account operations that sit directly on the credential store.
///
/// Route-level role checks happen in the gates; this service assumes the
/// caller has already been admitted.
#[derive(Debug, Clone)]
pub struct AccountService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<PasswordHasher>,
    validator: PasswordValidator,
    default_avatar: String,
    protected_email: String,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<PasswordHasher>,
        auth: &AuthConfig,
        accounts: &AccountsConfig,
    ) -> Self {
        Self {
            store,
            hasher,
            validator: PasswordValidator::new(auth),
            default_avatar: auth.default_avatar.clone(),
            protected_email: normalize_email(&accounts.protected_email),
        }
    }

    fn user_account(
        &self,
        actor: &Identity,
        input: NewAccount,
        password_hash: String,
    ) -> CreateAccount {
        CreateAccount {
            name: input.name,
            email: input.email,
            password_hash,
            phone: input.phone,
            address: input.address,
            avatar: Some(self.default_avatar.clone()),
            role: AccountRole::User,
            created_by: Some(actor.account_id()),
        }
    }

    /// Creates a `User` account on behalf of an admin.
    pub async fn create_by_admin(
        &self,
        actor: &Identity,
        input: NewAccount,
    ) -> Result<Account, AppError> {
        self.validator.validate(&input.password)?;
        let password_hash = self.hasher.hash_password(&input.password)?;

        let account = self
            .store
            .create(self.user_account(actor, input, password_hash))
            .await?;

        info!(
            account_id = %account.id,
            created_by = %actor.account_id(),
            "Account created by admin"
        );
        Ok(account)
    }

    /// Creates several `User` accounts at once.
    ///
    /// Repeated emails keep their first occurrence. Entries whose password
    /// fails the policy or whose email is already registered are counted
    /// as failures instead of aborting the batch.
    pub async fn bulk_create(
        &self,
        actor: &Identity,
        inputs: Vec<NewAccount>,
    ) -> Result<BulkOutcome, AppError> {
        let submitted = inputs.len();
        let mut seen = HashSet::with_capacity(submitted);
        let mut pending = Vec::with_capacity(submitted);

        for input in inputs {
            if !seen.insert(normalize_email(&input.email)) {
                continue;
            }
            if let Err(e) = self.validator.validate(&input.password) {
                debug!(email = %input.email, error = %e, "Skipping bulk entry");
                continue;
            }
            let password_hash = self.hasher.hash_password(&input.password)?;
            pending.push(self.user_account(actor, input, password_hash));
        }

        let created = self.store.insert_many(pending).await?;
        let outcome = BulkOutcome {
            success: created.len(),
            fail: submitted - created.len(),
        };

        info!(
            created_by = %actor.account_id(),
            success = outcome.success,
            fail = outcome.fail,
            "Accounts created in bulk"
        );
        Ok(outcome)
    }

    /// Lists accounts with pagination.
    pub async fn list(&self, page: PageRequest) -> Result<PageResponse<Account>, AppError> {
        self.store.list(page).await
    }

    /// Gets a single account by ID.
    pub async fn get(&self, id: Uuid) -> Result<Account, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))
    }

    /// Overwrites the profile fields of an account, stamping the caller as
    /// `updated_by`.
    ///
    /// Tokens already issued keep their old snapshot.
    pub async fn update_profile(
        &self,
        actor: &Identity,
        mut input: UpdateAccount,
    ) -> Result<Account, AppError> {
        input.updated_by = Some(actor.account_id());
        if !self.store.update_profile(&input).await? {
            return Err(AppError::not_found("Account not found"));
        }
        info!(account_id = %input.id, by = %actor.account_id(), "Account profile updated");
        self.get(input.id).await
    }

    /// Soft-deletes an account and clears its stored refresh token.
    ///
    /// The protected admin account is refused. Access tokens already issued
    /// stay valid until they expire.
    pub async fn deactivate(&self, actor: &Identity, id: Uuid) -> Result<(), AppError> {
        let account = self.get(id).await?;
        if account.email == self.protected_email {
            warn!(
                account_id = %id,
                by = %actor.account_id(),
                "Refused to deactivate admin account"
            );
            return Err(AppError::validation("Cannot delete admin account"));
        }
        if !self.store.deactivate(id, actor.account_id()).await? {
            return Err(AppError::not_found("Account not found"));
        }

        info!(account_id = %id, by = %actor.account_id(), "Account deactivated");
        Ok(())
    }

    /// Re-enables a deactivated account.
    pub async fn activate(&self, actor: &Identity, id: Uuid) -> Result<(), AppError> {
        if !self.store.activate(id, actor.account_id()).await? {
            return Err(AppError::not_found("Account not found"));
        }

        info!(account_id = %id, by = %actor.account_id(), "Account activated");
        Ok(())
    }

    /// Changes the caller's own password after verifying the current one.
    pub async fn change_password(
        &self,
        identity: &Identity,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let account = self.get(identity.account_id()).await?;

        if !self
            .hasher
            .verify_password(current_password, &account.password_hash)?
        {
            return Err(AppError::validation("Invalid password"));
        }

        self.validator.validate(new_password)?;
        let password_hash = self.hasher.hash_password(new_password)?;
        if !self
            .store
            .update_password_hash(account.id, &password_hash)
            .await?
        {
            return Err(AppError::not_found("Account not found"));
        }

        info!(account_id = %account.id, "Password changed");
        Ok(())
    }
}
