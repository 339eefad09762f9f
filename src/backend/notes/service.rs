//! Note service
//!
//! Composes the access policy with the store. Every operation takes the
//! requester explicitly and re-reads the note before deciding anything, so
//! permissions are always checked against what is persisted right now.
//!
//! # Update flow
//!
//! 1. Validate the input
//! 2. Fetch the current note (`NotFound` if absent)
//! 3. Check `can_write` (`AccessDenied`)
//! 4. Compare-and-swap with the version **from the request**
//!
//! Step 4 deliberately ignores the version of the copy fetched in step 2: a
//! write landing between 2 and 4 must still be caught by the store.

use std::sync::Arc;

use crate::backend::notes::access::authorize;
use crate::backend::notes::error::{Capability, NoteError, StoreResultExt};
use crate::backend::notes::store::{NewNote, NoteStore, NoteUpdate};
use crate::shared::{CreateNoteInput, Note, NoteId, UpdateNoteInput, UserId};

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    /// Create a note owned by `owner`, at version 1
    pub async fn create(&self, owner: UserId, input: CreateNoteInput) -> Result<Note, NoteError> {
        input.validate()?;

        let note = self
            .store
            .create(NewNote {
                title: input.title,
                content: input.content,
                rendered_snapshot: input.rendered_snapshot,
                owner_id: owner,
                collaborators: input.collaborators,
            })
            .await
            .context(|| "failed to create note".to_string())?;

        tracing::info!(note_id = %note.id, owner_id = %owner, "Note created");
        Ok(note)
    }

    /// Fetch a note the requester may read
    pub async fn get(&self, id: NoteId, requester: UserId) -> Result<Note, NoteError> {
        let note = self.fetch(id).await?;
        authorize(&note, requester, Capability::Read)?;
        Ok(note)
    }

    /// Notes the requester owns or collaborates on, most recently updated first
    pub async fn list(&self, requester: UserId) -> Result<Vec<Note>, NoteError> {
        self.store
            .list_for_user(requester)
            .await
            .context(|| format!("failed to list notes for user {}", requester))
    }

    /// Replace a note's mutable fields if `input.version` is still current
    pub async fn update(
        &self,
        id: NoteId,
        requester: UserId,
        input: UpdateNoteInput,
    ) -> Result<Note, NoteError> {
        input.validate(id)?;

        let current = self.fetch(id).await?;
        authorize(&current, requester, Capability::Write)?;

        let expected_version = input.version;
        let updated = self
            .store
            .conditional_update(NoteUpdate {
                id,
                expected_version,
                title: input.title,
                content: input.content,
                rendered_snapshot: input.rendered_snapshot,
                collaborators: input.collaborators,
            })
            .await
            .context(|| format!("failed to update note {}", id))
            .inspect_err(|err| {
                if err.is_version_conflict() {
                    tracing::info!(note_id = %id, expected_version, "Update rejected by version check");
                }
            })?;

        tracing::info!(note_id = %id, version = updated.version, user_id = %requester, "Note updated");
        Ok(updated)
    }

    /// Delete a note; owner only, no version check
    pub async fn delete(&self, id: NoteId, requester: UserId) -> Result<(), NoteError> {
        let note = self.fetch(id).await?;
        authorize(&note, requester, Capability::Delete)?;

        let removed = self
            .store
            .delete(id)
            .await
            .context(|| format!("failed to delete note {}", id))?;
        if !removed {
            // A concurrent delete got there first
            return Err(NoteError::NotFound(id));
        }

        tracing::info!(note_id = %id, "Note deleted");
        Ok(())
    }

    async fn fetch(&self, id: NoteId) -> Result<Note, NoteError> {
        self.store
            .get_by_id(id)
            .await
            .context(|| format!("failed to get note {}", id))?
            .ok_or(NoteError::NotFound(id))
    }
}
