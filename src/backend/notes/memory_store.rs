//! In-memory note store
//!
//! Used when no database is configured and throughout the test suite. The
//! version check and the write happen under one acquisition of the map's
//! write lock, which gives `conditional_update` the same all-or-nothing
//! behaviour as the single-statement Postgres update.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backend::notes::store::{NewNote, NoteStore, NoteUpdate, StoreError};
use crate::shared::{Note, NoteId, UserId};

#[derive(Debug, Clone, Default)]
pub struct InMemoryNoteStore {
    notes: Arc<RwLock<HashMap<NoteId, Note>>>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notes
    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn create(&self, new: NewNote) -> Result<Note, StoreError> {
        let now = Utc::now();
        let note = Note {
            id: NoteId::new(),
            title: new.title,
            content: new.content,
            rendered_snapshot: new.rendered_snapshot,
            version: 1,
            owner_id: new.owner_id,
            collaborators: new.collaborators,
            created_at: now,
            updated_at: now,
        };
        self.notes.write().await.insert(note.id, note.clone());
        Ok(note)
    }

    async fn get_by_id(&self, id: NoteId) -> Result<Option<Note>, StoreError> {
        Ok(self.notes.read().await.get(&id).cloned())
    }

    async fn list_for_user(&self, user: UserId) -> Result<Vec<Note>, StoreError> {
        let mut notes: Vec<Note> = self
            .notes
            .read()
            .await
            .values()
            .filter(|note| note.is_collaborator(user))
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
        Ok(notes)
    }

    async fn conditional_update(&self, update: NoteUpdate) -> Result<Note, StoreError> {
        let mut notes = self.notes.write().await;
        let conflict = StoreError::VersionConflict {
            id: update.id,
            expected: update.expected_version,
        };

        let note = match notes.get_mut(&update.id) {
            Some(note) if note.version == update.expected_version => note,
            _ => return Err(conflict),
        };

        note.title = update.title;
        note.content = update.content;
        note.rendered_snapshot = update.rendered_snapshot;
        note.collaborators = update.collaborators;
        note.version += 1;
        // Keep updated_at monotonic per note even if the clock steps back
        note.updated_at = Utc::now().max(note.updated_at);
        Ok(note.clone())
    }

    async fn delete(&self, id: NoteId) -> Result<bool, StoreError> {
        Ok(self.notes.write().await.remove(&id).is_some())
    }
}
