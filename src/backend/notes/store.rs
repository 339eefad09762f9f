//! Note store contract
//!
//! The store owns persistence and the one piece of real concurrency control
//! in the system: `conditional_update`, a compare-and-swap on `(id, version)`.
//!
//! # Conditional update
//!
//! The caller passes the version it last read. The store must, as one atomic
//! step, find the row whose id **and** version match, apply the new fields,
//! bump the version by one, refresh `updated_at`, and return the new row.
//! If no row matches (the note was deleted, or another writer already moved
//! the version on) it fails with `StoreError::VersionConflict`. It never
//! overwrites, retries or merges.
//!
//! # Implementations
//!
//! - `PgNoteStore` - one `UPDATE ... WHERE id = $1 AND version = $2`
//! - `InMemoryNoteStore` - check-and-set under a single write lock

use async_trait::async_trait;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::shared::{Note, NoteContent, NoteId, UserId};

/// A note about to be created; the store assigns id, version and timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct NewNote {
    pub title: String,
    pub content: NoteContent,
    pub rendered_snapshot: String,
    pub owner_id: UserId,
    pub collaborators: BTreeSet<UserId>,
}

/// Replacement fields guarded by the expected version
#[derive(Debug, Clone, PartialEq)]
pub struct NoteUpdate {
    pub id: NoteId,
    /// Version the writer last observed
    pub expected_version: i64,
    pub title: String,
    pub content: NoteContent,
    pub rendered_snapshot: String,
    pub collaborators: BTreeSet<UserId>,
}

/// Store failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row matched `(id, expected_version)`
    #[error("version conflict on note {id}: expected version {expected}")]
    VersionConflict { id: NoteId, expected: i64 },

    /// Database or pool failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Note persistence
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Insert a note at version 1
    async fn create(&self, note: NewNote) -> Result<Note, StoreError>;

    /// Fetch by id; `None` when absent
    async fn get_by_id(&self, id: NoteId) -> Result<Option<Note>, StoreError>;

    /// Notes owned by or shared with `user`, most recently updated first
    async fn list_for_user(&self, user: UserId) -> Result<Vec<Note>, StoreError>;

    /// Compare-and-swap on `(id, expected_version)`
    async fn conditional_update(&self, update: NoteUpdate) -> Result<Note, StoreError>;

    /// Unconditional delete; `false` if nothing was removed
    async fn delete(&self, id: NoteId) -> Result<bool, StoreError>;
}
