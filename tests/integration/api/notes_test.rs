//! Notes API integration tests

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::future::IntoFuture;

use crate::common::{expect_data, expect_error, register_user, test_server, TestUser};

async fn create_note(server: &TestServer, owner: &TestUser, body: Value) -> Value {
    let response = server
        .post("/api/v1/notes")
        .authorization_bearer(&owner.token)
        .json(&body)
        .await;
    expect_data(&response, StatusCode::CREATED)
}

#[tokio::test]
async fn test_create_note_starts_at_version_one() {
    let server = test_server();
    let alice = register_user(&server, "alice@example.com").await;

    let note = create_note(
        &server,
        &alice,
        json!({
            "title": "Groceries",
            "content": { "blocks": [{ "type": "text", "value": "milk" }] },
            "rendered_snapshot": "milk"
        }),
    )
    .await;

    assert_eq!(note["version"], 1);
    assert_eq!(note["title"], "Groceries");
    assert_eq!(note["owner_id"], json!(alice.id));
    assert_eq!(note["content"]["blocks"][0]["value"], "milk");
    assert_eq!(note["collaborators"], json!([]));
    assert_eq!(note["created_at"], note["updated_at"]);
}

#[tokio::test]
async fn test_content_returned_as_sent() {
    let server = test_server();
    let alice = register_user(&server, "alice@example.com").await;
    let content = r#"{"z":1,"a":18446744073709551617,"f":1.10}"#;

    let response = server
        .post("/api/v1/notes")
        .authorization_bearer(&alice.token)
        .content_type("application/json")
        .bytes(format!(r#"{{"title":"exact","content":{}}}"#, content).into())
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert!(response.text().contains(&format!(r#""content":{}"#, content)));

    let id = response.json::<Value>()["data"]["id"].as_str().unwrap().to_string();
    let fetched = server
        .get(&format!("/api/v1/notes/{}", id))
        .authorization_bearer(&alice.token)
        .await;
    assert!(fetched.text().contains(&format!(r#""content":{}"#, content)));
}

#[tokio::test]
async fn test_create_note_rejects_long_title() {
    let server = test_server();
    let alice = register_user(&server, "alice@example.com").await;

    let response = server
        .post("/api/v1/notes")
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "x".repeat(501) }))
        .await;

    let error = expect_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(error["target"], "title");
}

#[tokio::test]
async fn test_list_only_visible_notes() {
    let server = test_server();
    let alice = register_user(&server, "alice@example.com").await;
    let bob = register_user(&server, "bob@example.com").await;
    let carol = register_user(&server, "carol@example.com").await;

    create_note(&server, &alice, json!({ "title": "private" })).await;
    create_note(
        &server,
        &alice,
        json!({ "title": "shared", "collaborators": [bob.id] }),
    )
    .await;
    create_note(&server, &bob, json!({ "title": "bob's" })).await;

    let titles = |data: Value| -> Vec<String> {
        let mut titles: Vec<String> = data
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["title"].as_str().unwrap().to_string())
            .collect();
        titles.sort();
        titles
    };

    let alice_list = server.get("/api/v1/notes").authorization_bearer(&alice.token).await;
    assert_eq!(titles(expect_data(&alice_list, StatusCode::OK)), vec!["private", "shared"]);

    let bob_list = server.get("/api/v1/notes").authorization_bearer(&bob.token).await;
    assert_eq!(titles(expect_data(&bob_list, StatusCode::OK)), vec!["bob's", "shared"]);

    let carol_list = server.get("/api/v1/notes").authorization_bearer(&carol.token).await;
    assert_eq!(expect_data(&carol_list, StatusCode::OK), json!([]));
}

#[tokio::test]
async fn test_get_note_errors() {
    let server = test_server();
    let alice = register_user(&server, "alice@example.com").await;
    let mallory = register_user(&server, "mallory@example.com").await;
    let note = create_note(&server, &alice, json!({ "title": "secret" })).await;
    let path = format!("/api/v1/notes/{}", note["id"].as_str().unwrap());

    let denied = server.get(&path).authorization_bearer(&mallory.token).await;
    expect_error(&denied, StatusCode::FORBIDDEN, "ACCESS_DENIED");

    let missing = server
        .get(&format!("/api/v1/notes/{}", uuid::Uuid::new_v4()))
        .authorization_bearer(&alice.token)
        .await;
    expect_error(&missing, StatusCode::NOT_FOUND, "NOT_FOUND");

    let malformed = server
        .get("/api/v1/notes/not-a-uuid")
        .authorization_bearer(&alice.token)
        .await;
    let error = expect_error(&malformed, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(error["target"], "id");
}

#[tokio::test]
async fn test_update_bumps_version_and_replaces_fields() {
    let server = test_server();
    let alice = register_user(&server, "alice@example.com").await;
    let bob = register_user(&server, "bob@example.com").await;
    let note = create_note(
        &server,
        &alice,
        json!({ "title": "draft", "collaborators": [bob.id] }),
    )
    .await;
    let path = format!("/api/v1/notes/{}", note["id"].as_str().unwrap());

    let response = server
        .put(&path)
        .authorization_bearer(&alice.token)
        .json(&json!({
            "title": "final",
            "content": { "text": "done" },
            "rendered_snapshot": "done",
            "collaborators": [],
            "version": 1
        }))
        .await;

    let updated = expect_data(&response, StatusCode::OK);
    assert_eq!(updated["version"], 2);
    assert_eq!(updated["title"], "final");
    assert_eq!(updated["collaborators"], json!([]));
    assert_eq!(updated["created_at"], note["created_at"]);

    // Bob was removed from the collaborator set
    let bob_get = server.get(&path).authorization_bearer(&bob.token).await;
    expect_error(&bob_get, StatusCode::FORBIDDEN, "ACCESS_DENIED");
}

#[tokio::test]
async fn test_update_rejects_mismatched_body_id() {
    let server = test_server();
    let alice = register_user(&server, "alice@example.com").await;
    let note = create_note(&server, &alice, json!({ "title": "a" })).await;
    let path = format!("/api/v1/notes/{}", note["id"].as_str().unwrap());

    let response = server
        .put(&path)
        .authorization_bearer(&alice.token)
        .json(&json!({ "id": uuid::Uuid::new_v4(), "title": "b", "version": 1 }))
        .await;

    let error = expect_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(error["target"], "id");
}

#[tokio::test]
async fn test_stale_version_conflict() {
    let server = test_server();
    let alice = register_user(&server, "alice@example.com").await;
    let note = create_note(&server, &alice, json!({ "title": "v1" })).await;
    let path = format!("/api/v1/notes/{}", note["id"].as_str().unwrap());

    let first = server
        .put(&path)
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "v2", "version": 1 }))
        .await;
    expect_data(&first, StatusCode::OK);

    let stale = server
        .put(&path)
        .authorization_bearer(&alice.token)
        .json(&json!({ "title": "lost", "version": 1 }))
        .await;
    let error = expect_error(&stale, StatusCode::CONFLICT, "VERSION_CONFLICT");
    assert_eq!(error["target"], "version");

    let current = server.get(&path).authorization_bearer(&alice.token).await;
    let current = expect_data(&current, StatusCode::OK);
    assert_eq!(current["title"], "v2");
    assert_eq!(current["version"], 2);
}

#[tokio::test]
async fn test_concurrent_updates_single_winner() {
    let server = test_server();
    let alice = register_user(&server, "alice@example.com").await;
    let note = create_note(&server, &alice, json!({ "title": "race" })).await;
    let path = format!("/api/v1/notes/{}", note["id"].as_str().unwrap());

    let requests = (0..8).map(|i| {
        server
            .put(&path)
            .authorization_bearer(&alice.token)
            .json(&json!({ "title": format!("writer {}", i), "version": 1 }))
            .into_future()
    });
    let responses = futures_util::future::join_all(requests).await;

    let winners = responses
        .iter()
        .filter(|r| r.status_code() == StatusCode::OK)
        .count();
    let conflicts = responses
        .iter()
        .filter(|r| r.status_code() == StatusCode::CONFLICT)
        .count();
    assert_eq!(winners, 1);
    assert_eq!(conflicts, 7);

    let current = server.get(&path).authorization_bearer(&alice.token).await;
    assert_eq!(expect_data(&current, StatusCode::OK)["version"], 2);
}

#[tokio::test]
async fn test_delete_owner_only() {
    let server = test_server();
    let alice = register_user(&server, "alice@example.com").await;
    let bob = register_user(&server, "bob@example.com").await;
    let note = create_note(
        &server,
        &alice,
        json!({ "title": "shared", "collaborators": [bob.id] }),
    )
    .await;
    let path = format!("/api/v1/notes/{}", note["id"].as_str().unwrap());

    let by_collaborator = server.delete(&path).authorization_bearer(&bob.token).await;
    let error = expect_error(&by_collaborator, StatusCode::FORBIDDEN, "ACCESS_DENIED");
    assert_eq!(error["message"], "Only the owner can delete this note");

    server
        .delete(&path)
        .authorization_bearer(&alice.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let again = server.delete(&path).authorization_bearer(&alice.token).await;
    expect_error(&again, StatusCode::NOT_FOUND, "NOT_FOUND");
}

#[tokio::test]
async fn test_notes_require_authentication() {
    let server = test_server();

    let response = server.get("/api/v1/notes").await;
    expect_error(&response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
}
