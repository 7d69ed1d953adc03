//! PostgreSQL pool for the account store.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use storefront_core::config::DatabaseConfig;
use storefront_core::error::{AppError, ErrorKind};
use storefront_core::result::AppResult;

/// Parses `database.url`. Only host, port and database name are ever logged.
fn connect_options(url: &str) -> AppResult<PgConnectOptions> {
    PgConnectOptions::from_str(url).map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            "database.url is not a valid PostgreSQL URL",
            e,
        )
    })
}

/// Opens the pool backing [`AccountRepository`](crate::AccountRepository).
pub async fn connect_pool(config: &DatabaseConfig) -> AppResult<PgPool> {
    let options = connect_options(&config.url)?;
    info!(
        host = options.get_host(),
        port = options.get_port(),
        database = options.get_database().unwrap_or_default(),
        max_connections = config.max_connections,
        "Opening account store pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        .connect_with(options)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Account store is unreachable", e))?;

    info!(connections = pool.size(), "Account store pool ready");
    Ok(pool)
}
