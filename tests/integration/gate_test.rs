//! Integration tests for the request gate.

use axum::http::StatusCode;

use uuid::Uuid;

use storefront_auth::{TokenIssuer, TokenKind};
use storefront_entity::account::{AccountProfile, AccountRole};

use crate::helpers::{TestApp, test_config};

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let app = TestApp::new();

    let health = app.request("GET", "/api/v1/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["data"]["status"], "ok");
    assert_eq!(health.body["data"]["store"], true);
}

#[tokio::test]
async fn test_head_on_public_route_needs_no_token() {
    let app = TestApp::new();
    let response = app.request("HEAD", "/api/v1/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_undeclared_method_is_not_allowed() {
    let app = TestApp::new();

    let put = app.request("PUT", "/api/v1/health", None, None).await;
    assert_eq!(put.status, StatusCode::METHOD_NOT_ALLOWED);

    let delete = app.request("DELETE", "/api/v1/auth/login", None, None).await;
    assert_eq!(delete.status, StatusCode::METHOD_NOT_ALLOWED);

    let patch = app.request("PATCH", "/api/v1/users/bulk", None, None).await;
    assert_eq!(patch.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_missing_and_malformed_tokens_are_unauthorized() {
    let app = TestApp::new();

    let missing = app.request("GET", "/api/v1/auth/account", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["message"], "Missing access token");

    let garbage = app
        .request("GET", "/api/v1/auth/account", None, Some("garbage"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.body["message"], "Invalid access token");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = TestApp::new();

    let mut config = test_config();
    config.auth.access_token_secret = "some-other-secret".to_string();
    let foreign = TokenIssuer::new(&config.auth).unwrap();
    let profile = AccountProfile {
        id: Uuid::new_v4(),
        name: "Mallory".to_string(),
        email: "mallory@shop.test".to_string(),
        role: AccountRole::Admin,
        avatar: None,
        phone: None,
        address: None,
    };
    let token = foreign.issue(&profile, TokenKind::Access).unwrap().token;

    let response = app
        .request("GET", "/api/v1/users?current=1&pageSize=10", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_enforce_role() {
    let app = TestApp::new();
    let (_, admin_token) = app.admin_session().await;
    app.create_account("Ada", "ada@shop.test", "password123", AccountRole::User)
        .await;
    let user_token = app.login("ada@shop.test", "password123").await.access_token();

    let path = "/api/v1/users?current=1&pageSize=10";

    let anonymous = app.request("GET", path, None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let user = app.request("GET", path, None, Some(&user_token)).await;
    assert_eq!(user.status, StatusCode::FORBIDDEN);

    let admin = app.request("GET", path, None, Some(&admin_token)).await;
    assert_eq!(admin.status, StatusCode::OK);
}

#[tokio::test]
async fn test_gate_runs_before_body_validation() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/v1/users",
            Some(serde_json::json!({ "unexpected": true })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/v1/nowhere", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
