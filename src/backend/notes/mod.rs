//! Notes Module
//!
//! Notes are versioned documents with an owner and a set of collaborators.
//! Updates are optimistic: the client sends the version it last read, and
//! the store applies the write only if that version is still current.
//!
//! # Module Structure
//!
//! ```text
//! notes/
//! ├── mod.rs           - Module exports and documentation
//! ├── access.rs        - can_read / can_write / can_delete policy
//! ├── error.rs         - NoteError and Capability
//! ├── store.rs         - NoteStore trait and StoreError
//! ├── memory_store.rs  - In-memory NoteStore
//! ├── pg_store.rs      - PostgreSQL NoteStore
//! ├── service.rs       - NoteService (access checks + compare-and-swap)
//! └── handlers.rs      - HTTP handlers
//! ```
//!
//! # Access Rules
//!
//! | Capability | Owner | Collaborator | Anyone else |
//! |---|---|---|---|
//! | read | yes | yes | no |
//! | write | yes | yes | no |
//! | delete | yes | no | no |

/// Access-control policy
pub mod access;

/// Note error types
pub mod error;

/// Storage trait
pub mod store;

/// In-memory store
pub mod memory_store;

/// PostgreSQL store
pub mod pg_store;

/// Note service
pub mod service;

/// HTTP handlers
pub mod handlers;

pub use error::{Capability, NoteError};
pub use handlers::{create_note, delete_note, get_note, list_notes, update_note};
pub use memory_store::InMemoryNoteStore;
pub use pg_store::PgNoteStore;
pub use service::NoteService;
pub use store::{NoteStore, StoreError};
