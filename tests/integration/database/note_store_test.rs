//! PgNoteStore against a real database

use assert_matches::assert_matches;
use notekeep::backend::notes::store::{NewNote, NoteUpdate};
use notekeep::backend::notes::{NoteStore, PgNoteStore, StoreError};
use notekeep::shared::{NoteContent, NoteId, UserId};
use serde_json::json;
use serial_test::serial;
use std::collections::BTreeSet;

use crate::common::database::{create_test_user, test_pool};

fn new_note(owner: UserId, collaborators: BTreeSet<UserId>) -> NewNote {
    NewNote {
        title: "draft".to_string(),
        content: NoteContent::from_value(&json!({
            "type": "doc",
            "content": [{ "type": "text", "text": "hi" }]
        }))
        .unwrap(),
        rendered_snapshot: "hi".to_string(),
        owner_id: owner,
        collaborators,
    }
}

fn update_of(id: NoteId, expected_version: i64, title: &str) -> NoteUpdate {
    NoteUpdate {
        id,
        expected_version,
        title: title.to_string(),
        content: NoteContent::from_value(&json!({ "title": title })).unwrap(),
        rendered_snapshot: title.to_string(),
        collaborators: BTreeSet::new(),
    }
}

#[tokio::test]
#[serial(postgres)]
async fn test_create_and_get() {
    let Some(pool) = test_pool().await else { return };
    let owner = create_test_user(&pool, "owner@example.com").await;
    let friend = create_test_user(&pool, "friend@example.com").await;
    let store = PgNoteStore::new(pool);

    let created = store
        .create(new_note(owner.id, BTreeSet::from([friend.id])))
        .await
        .unwrap();
    assert_eq!(created.version, 1);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = store.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.content, created.content);
    assert_eq!(fetched.collaborators, BTreeSet::from([friend.id]));

    assert!(store.get_by_id(NoteId::new()).await.unwrap().is_none());
}

#[tokio::test]
#[serial(postgres)]
async fn test_content_stored_verbatim() {
    let Some(pool) = test_pool().await else { return };
    let owner = create_test_user(&pool, "owner@example.com").await;
    let store = PgNoteStore::new(pool);
    let raw = r#"{"z": 1, "a": 18446744073709551617, "f": 1.10}"#;

    let mut note = new_note(owner.id, BTreeSet::new());
    note.content = NoteContent::parse(raw).unwrap();
    let created = store.create(note).await.unwrap();
    assert_eq!(created.content.as_str(), raw);

    let fetched = store.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.content.as_str(), raw);
}

#[tokio::test]
#[serial(postgres)]
async fn test_conditional_update_compare_and_swap() {
    let Some(pool) = test_pool().await else { return };
    let owner = create_test_user(&pool, "owner@example.com").await;
    let store = PgNoteStore::new(pool);
    let note = store.create(new_note(owner.id, BTreeSet::new())).await.unwrap();

    let updated = store.conditional_update(update_of(note.id, 1, "v2")).await.unwrap();
    assert_eq!(updated.version, 2);
    assert_eq!(updated.title, "v2");
    assert_eq!(updated.created_at, note.created_at);
    assert!(updated.updated_at >= note.updated_at);

    let stale = store.conditional_update(update_of(note.id, 1, "lost")).await;
    assert_matches!(stale, Err(StoreError::VersionConflict { expected: 1, .. }));

    let missing = store.conditional_update(update_of(NoteId::new(), 1, "x")).await;
    assert_matches!(missing, Err(StoreError::VersionConflict { .. }));

    let current = store.get_by_id(note.id).await.unwrap().unwrap();
    assert_eq!(current.title, "v2");
    assert_eq!(current.version, 2);
}

#[tokio::test]
#[serial(postgres)]
async fn test_concurrent_updates_single_winner() {
    let Some(pool) = test_pool().await else { return };
    let owner = create_test_user(&pool, "owner@example.com").await;
    let store = PgNoteStore::new(pool);
    let note = store.create(new_note(owner.id, BTreeSet::new())).await.unwrap();

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .conditional_update(update_of(note.id, 1, &format!("writer {}", i)))
                    .await
            })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(updated) => {
                assert_eq!(updated.version, 2);
                winners += 1;
            }
            Err(err) => assert_matches!(err, StoreError::VersionConflict { .. }),
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
#[serial(postgres)]
async fn test_list_for_user_visibility() {
    let Some(pool) = test_pool().await else { return };
    let alice = create_test_user(&pool, "alice@example.com").await;
    let bob = create_test_user(&pool, "bob@example.com").await;
    let carol = create_test_user(&pool, "carol@example.com").await;
    let store = PgNoteStore::new(pool);

    let first = store.create(new_note(alice.id, BTreeSet::new())).await.unwrap();
    let shared = store
        .create(new_note(alice.id, BTreeSet::from([bob.id])))
        .await
        .unwrap();
    // Touch `first` so it sorts ahead of `shared`
    store.conditional_update(update_of(first.id, 1, "touched")).await.unwrap();

    let alice_notes = store.list_for_user(alice.id).await.unwrap();
    let ids: Vec<NoteId> = alice_notes.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![first.id, shared.id]);

    let bob_notes = store.list_for_user(bob.id).await.unwrap();
    assert_eq!(bob_notes.len(), 1);
    assert_eq!(bob_notes[0].id, shared.id);

    assert!(store.list_for_user(carol.id).await.unwrap().is_empty());
}

#[tokio::test]
#[serial(postgres)]
async fn test_delete() {
    let Some(pool) = test_pool().await else { return };
    let owner = create_test_user(&pool, "owner@example.com").await;
    let store = PgNoteStore::new(pool);
    let note = store.create(new_note(owner.id, BTreeSet::new())).await.unwrap();

    assert!(store.delete(note.id).await.unwrap());
    assert!(!store.delete(note.id).await.unwrap());
    assert!(store.get_by_id(note.id).await.unwrap().is_none());
}
