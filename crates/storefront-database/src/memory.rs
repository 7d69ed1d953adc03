//! In-memory credential store backed by `DashMap`.
//!
//! Used for local development and tests. Each account lives under a single
//! shard lock, so the conditional refresh-token swap is atomic with respect to
//! every other write to the same account.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;
use uuid::Uuid;

use storefront_core::AppError;
use storefront_core::error::ErrorKind;
use storefront_core::result::AppResult;
use storefront_core::types::{PageRequest, PageResponse};
use storefront_entity::account::{Account, CreateAccount, UpdateAccount, normalize_email};

use crate::store::CredentialStore;

/// Process-local account store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    /// Accounts keyed by ID.
    accounts: DashMap<Uuid, Account>,
    /// Normalized email to account ID.
    emails: DashMap<String, Uuid>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn update<F>(&self, id: Uuid, apply: F) -> bool
    where
        F: FnOnce(&mut Account),
    {
        match self.accounts.get_mut(&id) {
            Some(mut account) => {
                apply(&mut account);
                account.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        Ok(self.accounts.get(&id).map(|a| a.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let id = match self.emails.get(&normalize_email(email)) {
            Some(id) => *id,
            None => return Ok(None),
        };
        self.find_by_id(id).await
    }

    async fn find_by_refresh_token(&self, token: &str) -> AppResult<Option<Account>> {
        Ok(self
            .accounts
            .iter()
            .find(|a| a.refresh_token.as_deref() == Some(token))
            .map(|a| a.value().clone()))
    }

    async fn list(&self, page: PageRequest) -> AppResult<PageResponse<Account>> {
        let mut all: Vec<Account> = self.accounts.iter().map(|a| a.value().clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let total = all.len() as u64;
        let data = all
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .collect();
        Ok(PageResponse::new(data, page, total))
    }

    async fn create(&self, input: CreateAccount) -> AppResult<Account> {
        let account = Account::from_create(input);
        match self.emails.entry(account.email.clone()) {
            Entry::Occupied(_) => Err(AppError::already_exists("Email already exists")),
            Entry::Vacant(slot) => {
                slot.insert(account.id);
                self.accounts.insert(account.id, account.clone());
                debug!(account_id = %account.id, "Account stored in memory");
                Ok(account)
            }
        }
    }

    async fn insert_many(&self, inputs: Vec<CreateAccount>) -> AppResult<Vec<Account>> {
        let mut inserted = Vec::with_capacity(inputs.len());
        for input in inputs {
            match self.create(input).await {
                Ok(account) => inserted.push(account),
                Err(e) if e.kind == ErrorKind::AlreadyExists => {}
                Err(e) => return Err(e),
            }
        }
        Ok(inserted)
    }

    async fn update_profile(&self, input: &UpdateAccount) -> AppResult<bool> {
        Ok(self.update(input.id, |account| {
            account.name = input.name.clone();
            account.phone = input.phone.clone();
            account.address = input.address.clone();
            account.avatar = input.avatar.clone();
            account.updated_by = input.updated_by;
        }))
    }

    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> AppResult<bool> {
        Ok(self.update(id, |account| {
            account.refresh_token = token.map(str::to_string);
        }))
    }

    async fn swap_refresh_token(&self, id: Uuid, expected: &str, next: &str) -> AppResult<bool> {
        let Some(mut account) = self.accounts.get_mut(&id) else {
            return Ok(false);
        };
        if account.refresh_token.as_deref() != Some(expected) {
            return Ok(false);
        }
        account.refresh_token = Some(next.to_string());
        account.updated_at = Utc::now();
        Ok(true)
    }

    async fn deactivate(&self, id: Uuid, by: Uuid) -> AppResult<bool> {
        Ok(self.update(id, |account| {
            account.is_active = false;
            account.refresh_token = None;
            account.deleted_by = Some(by);
            account.deleted_at = Some(Utc::now());
        }))
    }

    async fn activate(&self, id: Uuid, by: Uuid) -> AppResult<bool> {
        Ok(self.update(id, |account| {
            account.is_active = true;
            account.updated_by = Some(by);
            account.deleted_by = None;
            account.deleted_at = None;
        }))
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> AppResult<bool> {
        Ok(self.update(id, |account| {
            account.password_hash = password_hash.to_string();
        }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
