//! Authentication API integration tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{expect_data, expect_error, register_user, test_server};

#[tokio::test]
async fn test_register_returns_token_and_user() {
    let server = test_server();

    let response = server
        .post("/api/v1/auth/register")
        .json(&json!({ "email": "Alice@Example.com", "password": "password123" }))
        .await;

    let data = expect_data(&response, StatusCode::CREATED);
    assert!(data["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(data["user"]["email"], "alice@example.com");
    assert!(data["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = test_server();
    register_user(&server, "dup@example.com").await;

    let response = server
        .post("/api/v1/auth/register")
        .json(&json!({ "email": "DUP@example.com", "password": "password123" }))
        .await;

    expect_error(&response, StatusCode::CONFLICT, "USER_EXISTS");
}

#[tokio::test]
async fn test_register_short_password() {
    let server = test_server();

    let response = server
        .post("/api/v1/auth/register")
        .json(&json!({ "email": "short@example.com", "password": "abc" }))
        .await;

    let error = expect_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(error["target"], "password");
}

#[tokio::test]
async fn test_register_malformed_body() {
    let server = test_server();

    let response = server
        .post("/api/v1/auth/register")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    let error = expect_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(error["target"], "body");
}

#[tokio::test]
async fn test_login_success_and_wrong_password() {
    let server = test_server();
    register_user(&server, "login@example.com").await;

    let ok = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "login@example.com", "password": "password123" }))
        .await;
    let data = expect_data(&ok, StatusCode::OK);
    assert!(data["token"].is_string());

    let wrong = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "login@example.com", "password": "not-the-password" }))
        .await;
    expect_error(&wrong, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS");

    let unknown = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": "password123" }))
        .await;
    expect_error(&unknown, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let server = test_server();
    let user = register_user(&server, "me@example.com").await;

    let response = server
        .get("/api/v1/auth/me")
        .authorization_bearer(&user.token)
        .await;
    let data = expect_data(&response, StatusCode::OK);
    assert_eq!(data["email"], "me@example.com");

    let missing = server.get("/api/v1/auth/me").await;
    expect_error(&missing, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");

    let garbage = server
        .get("/api/v1/auth/me")
        .authorization_bearer("not.a.token")
        .await;
    expect_error(&garbage, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_change_password() {
    let server = test_server();
    let user = register_user(&server, "pw@example.com").await;

    let wrong_current = server
        .put("/api/v1/auth/password")
        .authorization_bearer(&user.token)
        .json(&json!({ "current_password": "nope-nope", "new_password": "brand-new-pass" }))
        .await;
    expect_error(&wrong_current, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS");

    let changed = server
        .put("/api/v1/auth/password")
        .authorization_bearer(&user.token)
        .json(&json!({ "current_password": "password123", "new_password": "brand-new-pass" }))
        .await;
    changed.assert_status(StatusCode::NO_CONTENT);

    let old = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "pw@example.com", "password": "password123" }))
        .await;
    expect_error(&old, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS");

    let new = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": "pw@example.com", "password": "brand-new-pass" }))
        .await;
    expect_data(&new, StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = test_server();

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static("trace-me-42"),
        )
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["requestId"], "trace-me-42");
    assert_eq!(response.header("x-request-id"), "trace-me-42");
    assert_eq!(body["data"]["storage"], "memory");
}
