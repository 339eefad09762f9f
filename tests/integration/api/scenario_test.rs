//! Shared-note scenarios over HTTP
//!
//! Alice creates a note shared with Bob; both edit from version 1, the
//! second writer loses; Carol is locked out; only Alice may delete.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{expect_data, expect_error, register_user, test_server};

#[tokio::test]
async fn test_shared_note_lifecycle() {
    let server = test_server();
    let alice = register_user(&server, "alice@example.com").await;
    let bob = register_user(&server, "bob@example.com").await;
    let carol = register_user(&server, "carol@example.com").await;

    // Alice creates, shared with Bob
    let created = server
        .post("/api/v1/notes")
        .authorization_bearer(&alice.token)
        .json(&json!({
            "title": "Trip plan",
            "content": { "items": ["tickets"] },
            "rendered_snapshot": "tickets",
            "collaborators": [bob.id]
        }))
        .await;
    let note = expect_data(&created, StatusCode::CREATED);
    assert_eq!(note["version"], 1);
    let path = format!("/api/v1/notes/{}", note["id"].as_str().unwrap());

    // Bob edits from version 1
    let bob_edit = server
        .put(&path)
        .authorization_bearer(&bob.token)
        .json(&json!({
            "title": "Trip plan",
            "content": { "items": ["tickets", "hotel"] },
            "rendered_snapshot": "tickets, hotel",
            "collaborators": [bob.id],
            "version": 1
        }))
        .await;
    assert_eq!(expect_data(&bob_edit, StatusCode::OK)["version"], 2);

    // Alice still holds version 1
    let alice_edit = server
        .put(&path)
        .authorization_bearer(&alice.token)
        .json(&json!({
            "title": "Trip plan",
            "content": { "items": ["tickets", "car"] },
            "rendered_snapshot": "tickets, car",
            "collaborators": [bob.id],
            "version": 1
        }))
        .await;
    expect_error(&alice_edit, StatusCode::CONFLICT, "VERSION_CONFLICT");

    // Carol is neither owner nor collaborator
    let carol_edit = server
        .put(&path)
        .authorization_bearer(&carol.token)
        .json(&json!({ "title": "mine now", "version": 2 }))
        .await;
    expect_error(&carol_edit, StatusCode::FORBIDDEN, "ACCESS_DENIED");

    // Alice re-reads and sees Bob's write
    let reread = server.get(&path).authorization_bearer(&alice.token).await;
    let current = expect_data(&reread, StatusCode::OK);
    assert_eq!(current["version"], 2);
    assert_eq!(current["rendered_snapshot"], "tickets, hotel");

    // Bob may edit but not delete
    let bob_delete = server.delete(&path).authorization_bearer(&bob.token).await;
    expect_error(&bob_delete, StatusCode::FORBIDDEN, "ACCESS_DENIED");

    server
        .delete(&path)
        .authorization_bearer(&alice.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let gone = server.get(&path).authorization_bearer(&bob.token).await;
    expect_error(&gone, StatusCode::NOT_FOUND, "NOT_FOUND");
}

#[tokio::test]
async fn test_owner_shares_after_conflict() {
    let server = test_server();
    let u1 = register_user(&server, "u1@example.com").await;
    let u2 = register_user(&server, "u2@example.com").await;

    let created = server
        .post("/api/v1/notes")
        .authorization_bearer(&u1.token)
        .json(&json!({ "title": "t", "collaborators": [] }))
        .await;
    let note = expect_data(&created, StatusCode::CREATED);
    let path = format!("/api/v1/notes/{}", note["id"].as_str().unwrap());

    let edit = json!({ "title": "t2", "version": 1 });
    let first = server.put(&path).authorization_bearer(&u1.token).json(&edit).await;
    assert_eq!(expect_data(&first, StatusCode::OK)["version"], 2);

    let replay = server.put(&path).authorization_bearer(&u1.token).json(&edit).await;
    expect_error(&replay, StatusCode::CONFLICT, "VERSION_CONFLICT");

    let u2_get = server.get(&path).authorization_bearer(&u2.token).await;
    expect_error(&u2_get, StatusCode::FORBIDDEN, "ACCESS_DENIED");

    let share = server
        .put(&path)
        .authorization_bearer(&u1.token)
        .json(&json!({ "title": "t2", "collaborators": [u2.id], "version": 2 }))
        .await;
    assert_eq!(expect_data(&share, StatusCode::OK)["version"], 3);

    let u2_get = server.get(&path).authorization_bearer(&u2.token).await;
    expect_data(&u2_get, StatusCode::OK);

    let u2_delete = server.delete(&path).authorization_bearer(&u2.token).await;
    expect_error(&u2_delete, StatusCode::FORBIDDEN, "ACCESS_DENIED");

    server
        .delete(&path)
        .authorization_bearer(&u1.token)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let gone = server.get(&path).authorization_bearer(&u1.token).await;
    expect_error(&gone, StatusCode::NOT_FOUND, "NOT_FOUND");
}
