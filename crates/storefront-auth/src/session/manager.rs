//! Session lifecycle manager: login, refresh, logout and register flows.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use storefront_core::config::AuthConfig;
use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_database::CredentialStore;
use storefront_entity::account::{Account, AccountProfile, AccountRole, CreateAccount};

use crate::gate::Identity;
use crate::jwt::{TokenIssuer, TokenKind};
use crate::password::{PasswordHasher, PasswordValidator};

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const INVALID_REFRESH_TOKEN: &str = "Invalid refresh token";

/// Cookie directive for the refresh token.
///
/// An empty `value` with a zero `max_age` tells the client to drop the cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshCookie {
    /// Cookie name.
    pub name: String,
    /// Refresh token, or empty when clearing.
    pub value: String,
    /// Lifetime of the cookie.
    pub max_age: Duration,
}

impl RefreshCookie {
    /// Whether this directive removes the cookie.
    pub fn is_removal(&self) -> bool {
        self.value.is_empty()
    }
}

/// Result of a successful login or refresh.
#[derive(Debug, Clone)]
pub struct SessionGrant {
    /// Bearer token for API requests.
    pub access_token: String,
    /// Refresh token to deliver as an http-only cookie.
    pub refresh_cookie: RefreshCookie,
    /// Public projection of the account.
    pub user: AccountProfile,
}

/// Self-service registration input.
#[derive(Debug, Clone)]
pub struct RegisterAccount {
    /// Display name.
    pub name: String,
    /// Login identifier.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Shipping address.
    pub address: Option<String>,
}

/// Orchestrates login, refresh, logout and register.
///
/// The only component that writes an account's stored refresh token on the
/// session path. An account holds at most one refresh token: every login or
/// refresh overwrites it, which revokes whatever was issued before.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    issuer: Arc<TokenIssuer>,
    hasher: Arc<PasswordHasher>,
    policy: PasswordValidator,
    settle_delay: Duration,
    cookie_name: String,
    default_avatar: String,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("issuer", &self.issuer)
            .field("settle_delay", &self.settle_delay)
            .field("cookie_name", &self.cookie_name)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        issuer: Arc<TokenIssuer>,
        hasher: Arc<PasswordHasher>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            store,
            issuer,
            hasher,
            policy: PasswordValidator::new(config),
            settle_delay: config.settle_delay(),
            cookie_name: config.refresh_cookie_name.clone(),
            default_avatar: config.default_avatar.clone(),
        }
    }

    /// Name of the refresh token cookie.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Verifies credentials and opens a session.
    ///
    /// Unknown email, wrong password and inactive account all fail with the
    /// same `Unauthorized` error. The settle delay runs before returning on
    /// both the success and the credential-failure path.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<SessionGrant> {
        let result = match self.check_credentials(email, password).await? {
            Some(account) => self.open_session(&account).await,
            None => Err(AppError::unauthorized(INVALID_CREDENTIALS)),
        };

        self.settle().await;
        result
    }

    /// Exchanges a refresh token for a new session.
    ///
    /// The account is resolved by stored-token equality, so a token that has
    /// been superseded by a later login or refresh is rejected even before it
    /// expires. The stored token is replaced with a conditional swap: of two
    /// concurrent refreshes presenting the same token, exactly one succeeds.
    /// Every failure is the same `Forbidden("Invalid refresh token")`.
    pub async fn refresh(&self, presented: Option<&str>) -> AppResult<SessionGrant> {
        let Some(presented) = presented.filter(|t| !t.is_empty()) else {
            debug!("Refresh without cookie");
            return Err(invalid_refresh());
        };

        if let Err(reason) = self.issuer.verify(presented, TokenKind::Refresh) {
            debug!(reason = %reason, "Refresh token rejected");
            return Err(invalid_refresh());
        }

        let account = match self.store.find_by_refresh_token(presented).await? {
            Some(account) if account.is_active => account,
            Some(account) => {
                warn!(account_id = %account.id, "Refresh attempted for inactive account");
                return Err(invalid_refresh());
            }
            None => {
                debug!("Refresh token does not match any account");
                return Err(invalid_refresh());
            }
        };

        let grant = self.issue_grant(&account)?;
        let swapped = self
            .store
            .swap_refresh_token(account.id, presented, &grant.refresh_cookie.value)
            .await?;
        if !swapped {
            warn!(account_id = %account.id, "Refresh token was rotated concurrently");
            return Err(invalid_refresh());
        }

        info!(account_id = %account.id, "Session refreshed");
        self.settle().await;
        Ok(grant)
    }

    /// Ends the caller's session.
    ///
    /// Clears the stored refresh token so no token issued for this account
    /// can be exchanged again, then waits the settle delay. Returns the
    /// cookie directive that removes the client's copy.
    pub async fn logout(&self, identity: &Identity) -> AppResult<RefreshCookie> {
        let account_id = identity.account_id();
        if !self.store.set_refresh_token(account_id, None).await? {
            warn!(account_id = %account_id, "Logout for unknown account");
        }

        info!(account_id = %account_id, "Logout successful");
        self.settle().await;
        Ok(self.removal_cookie())
    }

    /// Creates a `User` account.
    ///
    /// Fails with `Validation` if the password is too weak and with
    /// `AlreadyExists` if the email is taken.
    pub async fn register(&self, input: RegisterAccount) -> AppResult<Account> {
        self.policy.validate(&input.password)?;
        let password_hash = self.hasher.hash_password(&input.password)?;

        let account = self
            .store
            .create(CreateAccount {
                name: input.name,
                email: input.email,
                password_hash,
                phone: input.phone,
                address: input.address,
                avatar: Some(self.default_avatar.clone()),
                role: AccountRole::User,
                created_by: None,
            })
            .await?;

        info!(account_id = %account.id, "Account registered");
        Ok(account)
    }

    /// A cookie directive that removes the refresh token cookie.
    pub fn removal_cookie(&self) -> RefreshCookie {
        RefreshCookie {
            name: self.cookie_name.clone(),
            value: String::new(),
            max_age: Duration::ZERO,
        }
    }

    async fn check_credentials(&self, email: &str, password: &str) -> AppResult<Option<Account>> {
        let Some(account) = self.store.find_by_email(email).await? else {
            debug!("Login for unknown email");
            return Ok(None);
        };

        if !self
            .hasher
            .verify_password(password, &account.password_hash)?
        {
            warn!(account_id = %account.id, "Login with wrong password");
            return Ok(None);
        }

        if !account.is_active {
            warn!(account_id = %account.id, "Login for inactive account");
            return Ok(None);
        }

        Ok(Some(account))
    }

    async fn open_session(&self, account: &Account) -> AppResult<SessionGrant> {
        let grant = self.issue_grant(account)?;
        let stored = self
            .store
            .set_refresh_token(account.id, Some(&grant.refresh_cookie.value))
            .await?;
        if !stored {
            return Err(AppError::internal("Account disappeared during login"));
        }

        info!(account_id = %account.id, role = %account.role, "Login successful");
        Ok(grant)
    }

    fn issue_grant(&self, account: &Account) -> AppResult<SessionGrant> {
        let user = AccountProfile::from(account);
        let access = self.issuer.issue(&user, TokenKind::Access)?;
        let refresh = self.issuer.issue(&user, TokenKind::Refresh)?;

        Ok(SessionGrant {
            access_token: access.token,
            refresh_cookie: RefreshCookie {
                name: self.cookie_name.clone(),
                value: refresh.token,
                max_age: refresh.ttl,
            },
            user,
        })
    }

    async fn settle(&self) {
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }
    }
}

fn invalid_refresh() -> AppError {
    AppError::forbidden(INVALID_REFRESH_TOKEN)
}
