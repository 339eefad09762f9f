//! Shared Module
//!
//! This module contains types that are shared between the note service, the
//! auth flow and the HTTP layer. Nothing in here depends on the server stack,
//! so it compiles without the `ssr` feature.
//!
//! # Overview
//!
//! - **`note`** - Note record, typed ids, create/update inputs and validation
//! - **`error`** - Input validation and serialization errors
//! - **`config`** - Layered application configuration

/// Note data structures
pub mod note;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use note::{CreateNoteInput, Note, NoteContent, NoteId, UpdateNoteInput, UserId};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
