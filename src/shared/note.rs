//! Note Data Structures
//!
//! Platform-agnostic note types used by the store, the service and the HTTP
//! layer. Identifiers are newtypes over `Uuid` so a note id can never be
//! passed where a user id is expected.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "id": "0b9f6a3e-…",
//!   "title": "Groceries",
//!   "content": {"type": "doc", "content": []},
//!   "rendered_snapshot": "<p>Groceries</p>",
//!   "version": 3,
//!   "owner_id": "5d1c…",
//!   "collaborators": ["9a2e…"],
//!   "created_at": "2024-05-01T10:00:00Z",
//!   "updated_at": "2024-05-02T08:30:00Z"
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Longest title accepted on create or update
pub const MAX_TITLE_CHARS: usize = 500;

/// Identity reference (user id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Note identifier, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub Uuid);

impl NoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn into_inner(self) -> Uuid {
        self.0
    }

    /// Parse a path segment into a note id
    pub fn parse(raw: &str) -> Result<Self, SharedError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| SharedError::validation("id", format!("'{}' is not a valid note id", raw)))
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for NoteId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Opaque JSON document, kept exactly as the writer sent it
///
/// The raw text is never re-encoded, so numbers outside the `f64`/`u64`
/// range, key order and formatting all survive a round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteContent(Box<RawValue>);

impl NoteContent {
    /// Wrap JSON text, rejecting anything that is not a single JSON value
    pub fn parse(raw: impl Into<String>) -> Result<Self, SharedError> {
        Ok(Self(RawValue::from_string(raw.into())?))
    }

    /// Encode a structured value
    pub fn from_value(value: &serde_json::Value) -> Result<Self, SharedError> {
        Ok(Self(serde_json::value::to_raw_value(value)?))
    }

    pub fn as_str(&self) -> &str {
        self.0.get()
    }
}

impl Default for NoteContent {
    fn default() -> Self {
        Self(RawValue::NULL.to_owned())
    }
}

impl PartialEq for NoteContent {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for NoteContent {}

impl fmt::Display for NoteContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted note
///
/// `content` is an opaque document and `rendered_snapshot` a caller-rendered
/// display string; neither is interpreted server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned id, immutable
    pub id: NoteId,
    /// Note title
    pub title: String,
    /// Structured document, stored as given
    pub content: NoteContent,
    /// Display string supplied by the writer
    pub rendered_snapshot: String,
    /// Starts at 1, +1 per successful update
    pub version: i64,
    /// Creator; never changes
    pub owner_id: UserId,
    /// Explicit collaborator set (owner is implicit)
    pub collaborators: BTreeSet<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn is_owner(&self, user: UserId) -> bool {
        self.owner_id == user
    }

    /// Owner or explicit collaborator
    pub fn is_collaborator(&self, user: UserId) -> bool {
        self.is_owner(user) || self.collaborators.contains(&user)
    }
}

/// Fields for a new note; the owner is the authenticated requester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateNoteInput {
    pub title: String,
    #[serde(default)]
    pub content: NoteContent,
    #[serde(default)]
    pub rendered_snapshot: String,
    #[serde(default)]
    pub collaborators: BTreeSet<UserId>,
}

impl CreateNoteInput {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_title(&self.title)
    }
}

/// Full replacement of a note's mutable fields
///
/// `version` is the version the caller last read. `collaborators` replaces
/// the stored set wholesale; there is no patch semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateNoteInput {
    /// Optional echo of the path id; must match it when present
    #[serde(default)]
    pub id: Option<NoteId>,
    pub title: String,
    #[serde(default)]
    pub content: NoteContent,
    #[serde(default)]
    pub rendered_snapshot: String,
    #[serde(default)]
    pub collaborators: BTreeSet<UserId>,
    pub version: i64,
}

impl UpdateNoteInput {
    pub fn validate(&self, path_id: NoteId) -> Result<(), SharedError> {
        if let Some(body_id) = self.id {
            if body_id != path_id {
                return Err(SharedError::validation(
                    "id",
                    "Body id does not match the note id in the path",
                ));
            }
        }
        if self.version < 1 {
            return Err(SharedError::validation("version", "Version must be at least 1"));
        }
        validate_title(&self.title)
    }
}

fn validate_title(title: &str) -> Result<(), SharedError> {
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(SharedError::validation(
            "title",
            format!("Title must be at most {} characters", MAX_TITLE_CHARS),
        ));
    }
    Ok(())
}
