//! Note access-control policy
//!
//! Pure functions of `(note, requester)`. The owner and every explicit
//! collaborator may read and write; only the owner may delete. Callers must
//! evaluate these against the note as currently persisted, never against a
//! copy they were handed.

use crate::backend::notes::error::{Capability, NoteError};
use crate::shared::{Note, UserId};

/// Owner or collaborator
pub fn can_read(note: &Note, user: UserId) -> bool {
    note.is_collaborator(user)
}

/// Same rule as `can_read`: any collaborator may edit every mutable field,
/// including the collaborator set
pub fn can_write(note: &Note, user: UserId) -> bool {
    can_read(note, user)
}

/// Owner only
pub fn can_delete(note: &Note, user: UserId) -> bool {
    note.is_owner(user)
}

/// Whether `user` holds `capability` on `note`
pub fn allows(note: &Note, user: UserId, capability: Capability) -> bool {
    match capability {
        Capability::Read => can_read(note, user),
        Capability::Write => can_write(note, user),
        Capability::Delete => can_delete(note, user),
    }
}

/// `allows`, as a `Result` the service can `?`
pub fn authorize(note: &Note, user: UserId, capability: Capability) -> Result<(), NoteError> {
    if allows(note, user, capability) {
        Ok(())
    } else {
        tracing::warn!(note_id = %note.id, user_id = %user, %capability, "Access denied");
        Err(NoteError::AccessDenied {
            note: note.id,
            user,
            capability,
        })
    }
}
