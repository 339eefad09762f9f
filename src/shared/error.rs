//! Shared Error Types
//!
//! This module defines error types that are shared between the note domain,
//! the auth flow and the HTTP layer. They describe malformed input rather than
//! infrastructure failures, so they are cheap to clone and carry no sources.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - Data validation failures tied to a field
//!
//! # Usage
//!
//! ```rust
//! use notekeep::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "Title must be at most 500 characters");
//! assert_eq!(error.field(), Some("title"));
//! ```
use thiserror::Error;

/// Shared error types for malformed input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The offending field, if the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationError { field, .. } => Some(field),
            Self::SerializationError { .. } => None,
        }
    }

    /// The message without the variant prefix
    pub fn detail(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } => message,
            Self::SerializationError { message } => message,
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
