//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use storefront_api::{AppState, build_app};
use storefront_auth::PasswordHasher;
use storefront_core::config::AppConfig;
use storefront_database::{CredentialStore, MemoryCredentialStore};
use storefront_entity::account::{AccountRole, CreateAccount};

/// Name of the refresh cookie used by the test configuration.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The in-memory store behind the router
    pub store: Arc<MemoryCredentialStore>,
    /// Application config
    pub config: AppConfig,
}

/// Response captured from a test request
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Parsed JSON body (`Value::Null` when empty)
    pub body: Value,
    /// The `Set-Cookie` header, if any
    pub set_cookie: Option<String>,
}

impl TestResponse {
    /// Value of the refresh cookie set by this response.
    pub fn refresh_cookie(&self) -> Option<String> {
        let header = self.set_cookie.as_deref()?;
        let pair = header.split(';').next()?;
        let (name, value) = pair.split_once('=')?;
        (name.trim() == REFRESH_COOKIE).then(|| value.trim().to_string())
    }

    /// `data.access_token` from a login or refresh response.
    pub fn access_token(&self) -> String {
        self.body["data"]["access_token"]
            .as_str()
            .expect("access_token in response")
            .to_string()
    }
}

/// Test configuration: no settle delay and cheap password hashing.
pub fn test_config() -> AppConfig {
    serde_json::from_value(serde_json::json!({
        "auth": {
            "access_token_secret": "integration-access-secret",
            "access_token_ttl_seconds": 900,
            "refresh_token_secret": "integration-refresh-secret",
            "refresh_token_ttl_seconds": 86400,
            "settle_delay_ms": 0,
            "hash_memory_kib": 256,
            "hash_iterations": 1,
            "hash_parallelism": 1
        },
        "database": { "provider": "memory" },
        "logging": { "level": "warn", "format": "pretty" }
    }))
    .expect("valid test config")
}

impl TestApp {
    /// Create the full application stack over an empty in-memory store
    pub fn new() -> Self {
        let config = test_config();
        let store = Arc::new(MemoryCredentialStore::new());
        let state = AppState::new(config.clone(), store.clone() as Arc<dyn CredentialStore>)
            .expect("Failed to build app state");

        Self {
            router: build_app(state, &config.server.cors),
            store,
            config,
        }
    }

    /// Insert an account directly into the store and return its ID.
    pub async fn create_account(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: AccountRole,
    ) -> Uuid {
        let hasher = PasswordHasher::new(&self.config.auth).expect("valid hash params");
        let account = self
            .store
            .create(CreateAccount {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: hasher.hash_password(password).expect("hash"),
                phone: None,
                address: None,
                avatar: None,
                role,
                created_by: None,
            })
            .await
            .expect("Failed to create test account");
        account.id
    }

    /// Seed an admin and log in, returning the admin's ID and access token.
    pub async fn admin_session(&self) -> (Uuid, String) {
        let id = self
            .create_account("Admin", "admin@shop.test", "admin-pass", AccountRole::Admin)
            .await;
        let token = self.login("admin@shop.test", "admin-pass").await.access_token();
        (id, token)
    }

    /// POST /auth/login
    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/v1/auth/login",
            Some(serde_json::json!({ "email": email, "password": password })),
            None,
        )
        .await
    }

    /// GET /auth/refresh with the given refresh cookie value
    pub async fn refresh(&self, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri("/api/v1/auth/refresh");
        if let Some(value) = cookie {
            builder = builder.header(header::COOKIE, format!("{REFRESH_COOKIE}={value}"));
        }
        self.send(builder.body(Body::empty()).expect("request"))
            .await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(t) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }

        let body = match body {
            Some(b) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&b).expect("json body"))
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).expect("request")).await
    }

    /// Send a body verbatim, without JSON encoding it first
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        content_type: &str,
        body: &'static str,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, content_type);
        if let Some(t) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        self.send(builder.body(Body::from(body)).expect("request"))
            .await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookie,
        }
    }
}
