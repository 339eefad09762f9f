//! Envelope assertions

use axum::http::StatusCode;
use axum_test::TestResponse;
use serde_json::Value;

/// Assert a success status and return the envelope's `data`
pub fn expect_data(response: &TestResponse, status: StatusCode) -> Value {
    assert_eq!(response.status_code(), status, "body: {}", response.text());
    let body: Value = response.json();
    assert!(body["requestId"].is_string(), "missing requestId: {}", body);
    assert!(body["timestamp"].is_string(), "missing timestamp: {}", body);
    body["data"].clone()
}

/// Assert an error status and code, returning the first error entry
pub fn expect_error(response: &TestResponse, status: StatusCode, code: &str) -> Value {
    assert_eq!(response.status_code(), status, "body: {}", response.text());
    let body: Value = response.json();
    assert!(body.get("data").is_none(), "error envelope carries data: {}", body);
    let error = body["errors"][0].clone();
    assert_eq!(error["code"], code, "body: {}", body);
    error
}
