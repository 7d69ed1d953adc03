//! Integration tests for the login, refresh, register and logout flows.

use axum::http::StatusCode;

use storefront_database::CredentialStore;
use storefront_entity::account::AccountRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_login_success_sets_refresh_cookie() {
    let app = TestApp::new();
    app.create_account("Ada", "ada@shop.test", "password123", AccountRole::User)
        .await;

    let response = app.login("ada@shop.test", "password123").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["message"], "User login");
    assert!(!response.access_token().is_empty());

    let user = &response.body["data"]["user"];
    assert_eq!(user["email"], "ada@shop.test");
    assert_eq!(user["role"], "USER");
    assert!(user.get("password_hash").is_none());
    assert!(user.get("refresh_token").is_none());

    let set_cookie = response.set_cookie.clone().expect("refresh cookie");
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Max-Age=86400"));
    assert!(response.refresh_cookie().is_some_and(|v| !v.is_empty()));
}

#[tokio::test]
async fn test_login_body_must_be_json() {
    let app = TestApp::new();

    let truncated = app
        .request_raw(
            "POST",
            "/api/v1/auth/login",
            "application/json",
            r#"{"email": "ada@shop.test""#,
            None,
        )
        .await;
    assert_eq!(truncated.status, StatusCode::BAD_REQUEST);
    assert_eq!(truncated.body["error"], "VALIDATION_ERROR");
    assert_eq!(truncated.body["message"], "Invalid request body");

    let wrong_type = app
        .request_raw(
            "POST",
            "/api/v1/auth/login",
            "text/plain",
            "email=ada@shop.test",
            None,
        )
        .await;
    assert_eq!(wrong_type.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_type.body["message"], "Invalid request body");
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let app = TestApp::new();
    app.create_account("Ada", "ada@shop.test", "password123", AccountRole::User)
        .await;

    let response = app.login("ADA@Shop.Test", "password123").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    let id = app
        .create_account("Ada", "ada@shop.test", "password123", AccountRole::User)
        .await;
    app.create_account("Bob", "bob@shop.test", "password123", AccountRole::User)
        .await;
    app.store.deactivate(id, id).await.unwrap();

    let wrong_password = app.login("bob@shop.test", "wrong-password").await;
    let unknown = app.login("nobody@shop.test", "password123").await;
    let inactive = app.login("ada@shop.test", "password123").await;

    for response in [&wrong_password, &unknown, &inactive] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["message"], "Invalid email or password");
        assert!(response.set_cookie.is_none());
    }
    assert_eq!(wrong_password.body, unknown.body);
    assert_eq!(unknown.body, inactive.body);
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = TestApp::new();
    let response = app.login("", "").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_creates_user_account() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/v1/auth/register",
            Some(serde_json::json!({
                "name": "Carol",
                "email": "carol@shop.test",
                "password": "secret-pass",
                "phone": "0123456789",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "Carol");
    assert!(response.body["data"]["_id"].is_string());

    let login = app.login("carol@shop.test", "secret-pass").await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["data"]["user"]["role"], "USER");
    assert_eq!(login.body["data"]["user"]["avatar"], "default-avatar.jpg");
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_weak_input() {
    let app = TestApp::new();
    app.create_account("Ada", "ada@shop.test", "password123", AccountRole::User)
        .await;

    let register = |email: &'static str, password: &'static str| {
        app.request(
            "POST",
            "/api/v1/auth/register",
            Some(serde_json::json!({
                "name": "Someone",
                "email": email,
                "password": password,
            })),
            None,
        )
    };

    let duplicate = register("ADA@shop.test", "password123").await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.body["message"], "Email already exists");

    let short = register("new@shop.test", "abc").await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);

    let bad_email = register("not-an-email", "password123").await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn test_refresh_rotates_and_supersedes() {
    let app = TestApp::new();
    app.create_account("Ada", "ada@shop.test", "password123", AccountRole::User)
        .await;

    let login = app.login("ada@shop.test", "password123").await;
    let first = login.refresh_cookie().expect("cookie");

    let refreshed = app.refresh(Some(&first)).await;
    assert_eq!(refreshed.status, StatusCode::OK);
    assert_eq!(refreshed.body["message"], "Get user by refresh token");
    assert_eq!(refreshed.body["data"]["user"]["email"], "ada@shop.test");
    let second = refreshed.refresh_cookie().expect("rotated cookie");
    assert_ne!(first, second);

    let replay = app.refresh(Some(&first)).await;
    assert_eq!(replay.status, StatusCode::FORBIDDEN);
    assert_eq!(replay.body["message"], "Invalid refresh token");

    let again = app.refresh(Some(&second)).await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_failures_are_uniform() {
    let app = TestApp::new();

    let missing = app.refresh(None).await;
    let garbage = app.refresh(Some("not-a-token")).await;

    for response in [&missing, &garbage] {
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.body["message"], "Invalid refresh token");
    }
}

#[tokio::test]
async fn test_access_token_is_not_a_refresh_token() {
    let app = TestApp::new();
    app.create_account("Ada", "ada@shop.test", "password123", AccountRole::User)
        .await;

    let login = app.login("ada@shop.test", "password123").await;
    let response = app.refresh(Some(&login.access_token())).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_second_login_revokes_first_session() {
    let app = TestApp::new();
    app.create_account("Ada", "ada@shop.test", "password123", AccountRole::User)
        .await;

    let first = app
        .login("ada@shop.test", "password123")
        .await
        .refresh_cookie()
        .expect("cookie");
    let second = app
        .login("ada@shop.test", "password123")
        .await
        .refresh_cookie()
        .expect("cookie");

    assert_eq!(app.refresh(Some(&first)).await.status, StatusCode::FORBIDDEN);
    assert_eq!(app.refresh(Some(&second)).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_account_returns_token_profile() {
    let app = TestApp::new();
    let id = app
        .create_account("Ada", "ada@shop.test", "password123", AccountRole::User)
        .await;
    let token = app.login("ada@shop.test", "password123").await.access_token();

    let response = app
        .request("GET", "/api/v1/auth/account", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["_id"], id.to_string());
    assert_eq!(response.body["data"]["name"], "Ada");
}

#[tokio::test]
async fn test_logout_clears_cookie_and_revokes_refresh() {
    let app = TestApp::new();
    app.create_account("Ada", "ada@shop.test", "password123", AccountRole::User)
        .await;
    let login = app.login("ada@shop.test", "password123").await;
    let cookie = login.refresh_cookie().expect("cookie");

    let response = app
        .request(
            "POST",
            "/api/v1/auth/logout",
            None,
            Some(&login.access_token()),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Logout user");
    let removal = response.set_cookie.clone().expect("removal cookie");
    assert!(removal.starts_with("refresh_token="));
    assert!(removal.contains("Max-Age=0"));

    let refresh = app.refresh(Some(&cookie)).await;
    assert_eq!(refresh.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_logout_requires_access_token() {
    let app = TestApp::new();
    let response = app.request("POST", "/api/v1/auth/logout", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
