//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use storefront_auth::gate::AuthenticationGate;
use storefront_auth::jwt::TokenIssuer;
use storefront_auth::password::PasswordHasher;
use storefront_auth::session::SessionManager;
use storefront_core::config::AppConfig;
use storefront_core::result::AppResult;
use storefront_database::CredentialStore;
use storefront_service::AccountService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Credential store (PostgreSQL or in-memory)
    pub store: Arc<dyn CredentialStore>,
    /// Authentication gate used by the gate middleware
    pub auth_gate: AuthenticationGate,
    /// Login/refresh/logout/register flows
    pub session_manager: Arc<SessionManager>,
    /// Account administration
    pub account_service: Arc<AccountService>,
}

impl AppState {
    /// Wires the auth components and services on top of a credential store.
    pub fn new(config: AppConfig, store: Arc<dyn CredentialStore>) -> AppResult<Self> {
        let token_issuer = Arc::new(TokenIssuer::new(&config.auth)?);
        let password_hasher = Arc::new(PasswordHasher::new(&config.auth)?);

        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&store),
            Arc::clone(&token_issuer),
            Arc::clone(&password_hasher),
            &config.auth,
        ));
        let account_service = Arc::new(AccountService::new(
            Arc::clone(&store),
            Arc::clone(&password_hasher),
            &config.auth,
            &config.accounts,
        ));
        let auth_gate = AuthenticationGate::new(Arc::clone(&token_issuer));

        Ok(Self {
            config: Arc::new(config),
            store,
            auth_gate,
            session_manager,
            account_service,
        })
    }
}
