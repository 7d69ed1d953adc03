//! Account repository backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use storefront_core::error::{AppError, ErrorKind};
use storefront_core::result::AppResult;
use storefront_core::types::{PageRequest, PageResponse};
use storefront_entity::account::{Account, CreateAccount, UpdateAccount, normalize_email};

use crate::store::CredentialStore;

const ACCOUNT_COLUMNS: &str = "id, name, email, password_hash, phone, address, avatar, role, \
     refresh_token, is_active, created_by, updated_by, deleted_by, deleted_at, created_at, updated_at";

fn insert_sql(on_conflict: &str) -> String {
    format!(
        "INSERT INTO accounts ({ACCOUNT_COLUMNS}) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
         {on_conflict} RETURNING {ACCOUNT_COLUMNS}"
    )
}

fn bind_account<'q>(
    query: sqlx::query::QueryAs<'q, sqlx::Postgres, Account, sqlx::postgres::PgArguments>,
    account: &'q Account,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, Account, sqlx::postgres::PgArguments> {
    query
        .bind(account.id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.phone)
        .bind(&account.address)
        .bind(&account.avatar)
        .bind(account.role)
        .bind(&account.refresh_token)
        .bind(account.is_active)
        .bind(account.created_by)
        .bind(account.updated_by)
        .bind(account.deleted_by)
        .bind(account.deleted_at)
        .bind(account.created_at)
        .bind(account.updated_at)
}

/// Repository for the `accounts` table.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> AppResult<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE {column} = $1");
        sqlx::query_as::<_, Account>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to find account by {column}"),
                    e,
                )
            })
    }
}

#[async_trait]
impl CredentialStore for AccountRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find account", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let email = normalize_email(email);
        self.find_one("email", &email).await
    }

    async fn find_by_refresh_token(&self, token: &str) -> AppResult<Option<Account>> {
        self.find_one("refresh_token", token).await
    }

    async fn list(&self, page: PageRequest) -> AppResult<PageResponse<Account>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count accounts", e))?;

        let sql = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        let accounts = sqlx::query_as::<_, Account>(&sql)
            .bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
            .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list accounts", e))?;

        Ok(PageResponse::new(accounts, page, total.max(0) as u64))
    }

    async fn create(&self, input: CreateAccount) -> AppResult<Account> {
        let account = Account::from_create(input);
        let sql = insert_sql("");
        bind_account(sqlx::query_as::<_, Account>(&sql), &account)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e {
                    if db_err.is_unique_violation()
                        || db_err.constraint() == Some("accounts_email_key")
                    {
                        return AppError::already_exists("Email already exists");
                    }
                }
                AppError::with_source(ErrorKind::Database, "Failed to create account", e)
            })
    }

    async fn insert_many(&self, inputs: Vec<CreateAccount>) -> AppResult<Vec<Account>> {
        let accounts: Vec<Account> = inputs.into_iter().map(Account::from_create).collect();
        let sql = insert_sql("ON CONFLICT (email) DO NOTHING");

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let mut inserted = Vec::with_capacity(accounts.len());
        for account in &accounts {
            let row = bind_account(sqlx::query_as::<_, Account>(&sql), account)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to create accounts", e)
                })?;
            inserted.extend(row);
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit accounts", e)
        })?;

        Ok(inserted)
    }

    async fn update_profile(&self, input: &UpdateAccount) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE accounts SET name = $2, phone = $3, address = $4, avatar = $5, \
             updated_by = $6, updated_at = NOW() WHERE id = $1",
        )
        .bind(input.id)
        .bind(&input.name)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(&input.avatar)
        .bind(input.updated_by)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update account", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE accounts SET refresh_token = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to store refresh token", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn swap_refresh_token(&self, id: Uuid, expected: &str, next: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE accounts SET refresh_token = $3, updated_at = NOW() \
             WHERE id = $1 AND refresh_token = $2",
        )
        .bind(id)
        .bind(expected)
        .bind(next)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to rotate refresh token", e)
        })?;

        Ok(result.rows_affected() == 1)
    }

    async fn deactivate(&self, id: Uuid, by: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE accounts SET is_active = FALSE, refresh_token = NULL, deleted_by = $2, \
             deleted_at = NOW(), updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(by)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to deactivate account", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn activate(&self, id: Uuid, by: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE accounts SET is_active = TRUE, updated_by = $2, deleted_by = NULL, \
             deleted_at = NULL, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(by)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to activate account", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE accounts SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update password", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
