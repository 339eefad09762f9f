//! Authentication test helpers

use axum::http::StatusCode;
use axum_test::TestServer;
use notekeep::shared::UserId;
use serde_json::json;

/// A registered user and their bearer token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: UserId,
    pub email: String,
    pub token: String,
}

/// Register `email` through the API and return its session
pub async fn register_user(server: &TestServer, email: &str) -> TestUser {
    let response = server
        .post("/api/v1/auth/register")
        .json(&json!({ "email": email, "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());

    let body: serde_json::Value = response.json();
    TestUser {
        id: serde_json::from_value(body["data"]["user"]["id"].clone()).unwrap(),
        email: email.to_string(),
        token: body["data"]["token"].as_str().unwrap().to_string(),
    }
}
