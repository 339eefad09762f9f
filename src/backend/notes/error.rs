//! Note domain errors
//!
//! `NoteError` is what the note service returns. Store failures other than a
//! version conflict are wrapped with the operation that hit them and surface
//! as `Internal`; a conflict is passed through as its own variant so callers
//! can re-fetch and retry.

use std::fmt;
use thiserror::Error;

use crate::backend::notes::store::StoreError;
use crate::shared::{NoteId, SharedError, UserId};

/// What a requester is trying to do with a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Read,
    Write,
    Delete,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
        };
        f.write_str(verb)
    }
}

/// Errors returned by the note service
#[derive(Debug, Error)]
pub enum NoteError {
    /// No note with this id exists (or it was deleted)
    #[error("note {0} not found")]
    NotFound(NoteId),

    /// The access policy rejected the requester
    #[error("user {user} may not {capability} note {note}")]
    AccessDenied {
        note: NoteId,
        user: UserId,
        capability: Capability,
    },

    /// The stored version no longer matches the caller's expected version
    #[error("note {id} changed since version {expected}; re-fetch and retry")]
    VersionConflict { id: NoteId, expected: i64 },

    /// Malformed input
    #[error(transparent)]
    Validation(#[from] SharedError),

    /// Store failure, with the operation that hit it
    #[error("{context}")]
    Internal {
        context: String,
        #[source]
        source: StoreError,
    },
}

impl NoteError {
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}

/// Attach operation context to store results
pub(crate) trait StoreResultExt<T> {
    fn context(self, context: impl FnOnce() -> String) -> Result<T, NoteError>;
}

impl<T> StoreResultExt<T> for Result<T, StoreError> {
    fn context(self, context: impl FnOnce() -> String) -> Result<T, NoteError> {
        self.map_err(|err| match err {
            StoreError::VersionConflict { id, expected } => NoteError::VersionConflict { id, expected },
            source => NoteError::Internal {
                context: context(),
                source,
            },
        })
    }
}
