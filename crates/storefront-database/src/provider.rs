//! Credential store selection based on configuration.

use std::sync::Arc;

use tracing::{info, warn};

use storefront_core::config::DatabaseConfig;
use storefront_core::error::AppError;
use storefront_core::result::AppResult;

use crate::connection::connect_pool;
use crate::memory::MemoryCredentialStore;
use crate::migration::run_migrations;
use crate::repositories::AccountRepository;
use crate::store::CredentialStore;

/// Build the configured credential store.
///
/// `"postgres"` connects a pool (and runs migrations when enabled);
/// `"memory"` returns an empty process-local store.
pub async fn connect_store(config: &DatabaseConfig) -> AppResult<Arc<dyn CredentialStore>> {
    let store: Arc<dyn CredentialStore> = match config.provider.as_str() {
        "postgres" => {
            info!("Initializing PostgreSQL credential store");
            let pool = connect_pool(config).await?;
            if config.run_migrations {
                run_migrations(&pool).await?;
            }
            Arc::new(AccountRepository::new(pool))
        }
        "memory" => {
            warn!("Using in-memory credential store; accounts are lost on restart");
            Arc::new(MemoryCredentialStore::new())
        }
        other => {
            return Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: postgres, memory"
            )));
        }
    };

    Ok(store)
}
