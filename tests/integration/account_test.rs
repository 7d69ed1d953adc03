//! Integration tests for account administration and self-service endpoints.

use axum::http::StatusCode;
use uuid::Uuid;

use storefront_entity::account::AccountRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_admin_creates_and_fetches_account() {
    let app = TestApp::new();
    let (admin_id, admin_token) = app.admin_session().await;

    let created = app
        .request(
            "POST",
            "/api/v1/users",
            Some(serde_json::json!({
                "name": "Dave",
                "email": "dave@shop.test",
                "password": "dave-pass",
                "address": "1 Market St",
            })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["data"]["name"], "Dave");
    let id = created.body["data"]["_id"].as_str().unwrap().to_string();

    let fetched = app
        .request("GET", &format!("/api/v1/users/{id}"), None, Some(&admin_token))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    let data = &fetched.body["data"];
    assert_eq!(data["email"], "dave@shop.test");
    assert_eq!(data["role"], "USER");
    assert_eq!(data["isActive"], true);
    assert_eq!(data["createdBy"], admin_id.to_string());
    assert!(data.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_admin_create_rejects_duplicate_email() {
    let app = TestApp::new();
    let (_, admin_token) = app.admin_session().await;

    let response = app
        .request(
            "POST",
            "/api/v1/users",
            Some(serde_json::json!({
                "name": "Again",
                "email": "admin@shop.test",
                "password": "password123",
            })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_a_validation_error() {
    let app = TestApp::new();
    let (_, admin_token) = app.admin_session().await;

    let truncated = app
        .request_raw(
            "POST",
            "/api/v1/users",
            "application/json",
            r#"{"name": "Dave", "email": "#,
            Some(&admin_token),
        )
        .await;
    assert_eq!(truncated.status, StatusCode::BAD_REQUEST);
    assert_eq!(truncated.body["error"], "VALIDATION_ERROR");
    assert_eq!(truncated.body["message"], "Invalid request body");

    let missing_field = app
        .request(
            "POST",
            "/api/v1/users",
            Some(serde_json::json!({ "name": "Dave", "email": "dave@shop.test" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(missing_field.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_field.body["message"], "Invalid request body");
}

#[tokio::test]
async fn test_bulk_create_reports_counts() {
    let app = TestApp::new();
    let (admin_id, admin_token) = app.admin_session().await;

    let response = app
        .request(
            "POST",
            "/api/v1/users/bulk",
            Some(serde_json::json!([
                { "name": "One", "email": "one@shop.test", "password": "password123" },
                { "name": "Two", "email": "two@shop.test", "password": "password123" },
                { "name": "Again", "email": "ONE@shop.test", "password": "password123" },
                { "name": "Taken", "email": "admin@shop.test", "password": "password123" },
                { "name": "Bad", "email": "not-an-email", "password": "password123" },
            ])),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Create a list of users");
    assert_eq!(response.body["data"]["success"], 2);
    assert_eq!(response.body["data"]["fail"], 3);

    let login = app.login("two@shop.test", "password123").await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["data"]["user"]["role"], "USER");

    let page = app
        .request(
            "GET",
            "/api/v1/users?current=1&pageSize=10",
            None,
            Some(&admin_token),
        )
        .await;
    let result = page.body["data"]["result"].as_array().unwrap();
    let one = result.iter().find(|a| a["email"] == "one@shop.test").unwrap();
    assert_eq!(one["createdBy"], admin_id.to_string());
}

#[tokio::test]
async fn test_bulk_create_is_admin_only() {
    let app = TestApp::new();
    app.create_account("Ada", "ada@shop.test", "password123", AccountRole::User)
        .await;
    let token = app.login("ada@shop.test", "password123").await.access_token();
    let body = serde_json::json!([
        { "name": "One", "email": "one@shop.test", "password": "password123" },
    ]);

    let user = app
        .request("POST", "/api/v1/users/bulk", Some(body.clone()), Some(&token))
        .await;
    assert_eq!(user.status, StatusCode::FORBIDDEN);

    let anonymous = app
        .request("POST", "/api/v1/users/bulk", Some(body), None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_paginates_newest_first() {
    let app = TestApp::new();
    let (_, admin_token) = app.admin_session().await;
    for i in 0..3 {
        app.create_account(
            &format!("User {i}"),
            &format!("user{i}@shop.test"),
            "password123",
            AccountRole::User,
        )
        .await;
    }

    let page = app
        .request(
            "GET",
            "/api/v1/users?current=1&pageSize=2",
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(page.status, StatusCode::OK);

    let meta = &page.body["data"]["meta"];
    assert_eq!(meta["current"], 1);
    assert_eq!(meta["pageSize"], 2);
    assert_eq!(meta["total"], 4);
    assert_eq!(meta["pages"], 2);

    let result = page.body["data"]["result"].as_array().unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result[0]["email"], "user2@shop.test");
}

#[tokio::test]
async fn test_list_page_beyond_any_offset_is_empty() {
    let app = TestApp::new();
    let (_, admin_token) = app.admin_session().await;

    let page = app
        .request(
            "GET",
            "/api/v1/users?current=18446744073709551615&pageSize=100",
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body["data"]["meta"]["total"], 1);
    assert!(page.body["data"]["result"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_requires_pagination_params() {
    let app = TestApp::new();
    let (_, admin_token) = app.admin_session().await;

    let response = app
        .request("GET", "/api/v1/users", None, Some(&admin_token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_or_malformed_id() {
    let app = TestApp::new();
    let (_, admin_token) = app.admin_session().await;

    let unknown = app
        .request(
            "GET",
            &format!("/api/v1/users/{}", Uuid::new_v4()),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let malformed = app
        .request("GET", "/api/v1/users/not-a-uuid", None, Some(&admin_token))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_profile_keeps_token_snapshot() {
    let app = TestApp::new();
    let id = app
        .create_account("Ada", "ada@shop.test", "password123", AccountRole::User)
        .await;
    let token = app.login("ada@shop.test", "password123").await.access_token();

    let updated = app
        .request(
            "PATCH",
            "/api/v1/users",
            Some(serde_json::json!({
                "_id": id,
                "name": "Ada Lovelace",
                "phone": "555-0100",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["name"], "Ada Lovelace");
    assert_eq!(updated.body["data"]["phone"], "555-0100");
    assert_eq!(updated.body["data"]["updatedBy"], id.to_string());

    let account = app
        .request("GET", "/api/v1/auth/account", None, Some(&token))
        .await;
    assert_eq!(account.body["data"]["name"], "Ada");
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::new();
    app.create_account("Ada", "ada@shop.test", "password123", AccountRole::User)
        .await;
    let token = app.login("ada@shop.test", "password123").await.access_token();

    let change = |current: &'static str, new: &'static str| {
        app.request(
            "POST",
            "/api/v1/users/change-password",
            Some(serde_json::json!({
                "currentPassword": current,
                "newPassword": new,
            })),
            Some(&token),
        )
    };

    let wrong = change("not-my-password", "brand-new-pass").await;
    assert_eq!(wrong.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong.body["message"], "Invalid password");

    let ok = change("password123", "brand-new-pass").await;
    assert_eq!(ok.status, StatusCode::OK);

    assert_eq!(
        app.login("ada@shop.test", "password123").await.status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.login("ada@shop.test", "brand-new-pass").await.status,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_deactivate_blocks_login_and_refresh_until_activated() {
    let app = TestApp::new();
    let (admin_id, admin_token) = app.admin_session().await;
    let id = app
        .create_account("Ada", "ada@shop.test", "password123", AccountRole::User)
        .await;
    let login = app.login("ada@shop.test", "password123").await;
    let cookie = login.refresh_cookie().expect("cookie");
    let token = login.access_token();

    let deleted = app
        .request("DELETE", &format!("/api/v1/users/{id}"), None, Some(&admin_token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let stamped = app
        .request("GET", &format!("/api/v1/users/{id}"), None, Some(&admin_token))
        .await;
    assert_eq!(stamped.body["data"]["isActive"], false);
    assert_eq!(stamped.body["data"]["deletedBy"], admin_id.to_string());
    assert!(stamped.body["data"]["deletedAt"].is_string());

    assert_eq!(app.refresh(Some(&cookie)).await.status, StatusCode::FORBIDDEN);
    assert_eq!(
        app.login("ada@shop.test", "password123").await.status,
        StatusCode::UNAUTHORIZED
    );

    // The access token is a snapshot and keeps working until it expires.
    let still_valid = app
        .request("GET", "/api/v1/auth/account", None, Some(&token))
        .await;
    assert_eq!(still_valid.status, StatusCode::OK);

    let activated = app
        .request("POST", &format!("/api/v1/users/{id}"), None, Some(&admin_token))
        .await;
    assert_eq!(activated.status, StatusCode::OK);
    assert_eq!(
        app.login("ada@shop.test", "password123").await.status,
        StatusCode::OK
    );

    let restored = app
        .request("GET", &format!("/api/v1/users/{id}"), None, Some(&admin_token))
        .await;
    assert_eq!(restored.body["data"]["updatedBy"], admin_id.to_string());
    assert!(restored.body["data"]["deletedBy"].is_null());
    assert!(restored.body["data"]["deletedAt"].is_null());
}

#[tokio::test]
async fn test_builtin_admin_cannot_be_deactivated() {
    let app = TestApp::new();
    let (_, admin_token) = app.admin_session().await;
    let builtin = app
        .create_account("Root", "admin@gmail.com", "root-pass", AccountRole::Admin)
        .await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/v1/users/{builtin}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Cannot delete admin account");
    assert_eq!(
        app.login("admin@gmail.com", "root-pass").await.status,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_deactivate_unknown_account_is_not_found() {
    let app = TestApp::new();
    let (_, admin_token) = app.admin_session().await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/v1/users/{}", Uuid::new_v4()),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
