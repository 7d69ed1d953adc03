//! Schema migrations for the account store.

use sqlx::PgPool;
use tracing::{debug, info};

use storefront_core::error::{AppError, ErrorKind};
use storefront_core::result::AppResult;

/// Applies the embedded `migrations/` directory. Already-applied versions are skipped.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    let migrator = sqlx::migrate!("../../migrations");
    let known = migrator.iter().count();
    debug!(known, "Checking account schema");

    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Account schema migration failed", e)
    })?;

    info!(known, "Account schema is current");
    Ok(())
}
