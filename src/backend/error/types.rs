/**
 * Backend Error Types
 *
 * This module defines the HTTP-facing error taxonomy. Domain errors from the
 * note service (`NoteError`), the auth service (`AuthError`) and input
 * validation (`SharedError`) are all converted into `BackendError`, which
 * knows its status code, its stable machine-readable code and the message
 * that is safe to show a client.
 *
 * # Status Code Mapping
 *
 * | Variant | Status | Code |
 * |---|---|---|
 * | `NotFound` | 404 | `NOT_FOUND` |
 * | `AccessDenied` | 403 | `ACCESS_DENIED` |
 * | `VersionConflict` | 409 | `VERSION_CONFLICT` |
 * | `Validation` | 400 | `VALIDATION_ERROR` |
 * | `Unauthorized` | 401 | `UNAUTHORIZED` |
 * | `InvalidCredentials` | 401 | `INVALID_CREDENTIALS` |
 * | `UserExists` | 409 | `USER_EXISTS` |
 * | `Internal` | 500 | `INTERNAL_ERROR` |
 *
 * Internal errors are logged with their full source chain when they are
 * converted; the client only sees a generic message.
 */

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::service::AuthError;
use crate::backend::notes::error::{Capability, NoteError};
use crate::shared::SharedError;

/// Backend-specific error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Note or identity absent
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Access policy rejection
    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    /// Compare-and-swap miss on a note update
    #[error("Version conflict: {message}")]
    VersionConflict { message: String },

    /// Malformed input
    #[error("Validation error: {message}")]
    Validation {
        /// Field or resource causing the error, when known
        target: Option<String>,
        message: String,
    },

    /// Missing, malformed or expired bearer token
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Login with an unknown email or a wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration with an email that is already taken
    #[error("User already exists")]
    UserExists,

    /// Store or unexpected failure
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BackendError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(target: Option<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            target,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::AccessDenied { .. } => StatusCode::FORBIDDEN,
            Self::VersionConflict { .. } => StatusCode::CONFLICT,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::UserExists => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::AccessDenied { .. } => "ACCESS_DENIED",
            Self::VersionConflict { .. } => "VERSION_CONFLICT",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserExists => "USER_EXISTS",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Client-facing message
    pub fn message(&self) -> String {
        match self {
            Self::NotFound { message }
            | Self::AccessDenied { message }
            | Self::VersionConflict { message }
            | Self::Validation { message, .. }
            | Self::Unauthorized { message } => message.clone(),
            Self::InvalidCredentials | Self::UserExists => self.to_string(),
            Self::Internal { .. } => "Internal server error".to_string(),
        }
    }

    /// Field or resource the error points at
    pub fn target(&self) -> Option<String> {
        match self {
            Self::Validation { target, .. } => target.clone(),
            Self::VersionConflict { .. } => Some("version".to_string()),
            _ => None,
        }
    }
}

impl From<NoteError> for BackendError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::NotFound(id) => Self::not_found(format!("Note {} not found", id)),
            NoteError::AccessDenied { capability, .. } => Self::AccessDenied {
                message: match capability {
                    Capability::Delete => "Only the owner can delete this note".to_string(),
                    Capability::Read | Capability::Write => {
                        "You do not have access to this note".to_string()
                    }
                },
            },
            NoteError::VersionConflict { id, expected } => Self::VersionConflict {
                message: format!(
                    "Note {} is no longer at version {}; fetch the latest version and retry",
                    id, expected
                ),
            },
            NoteError::Validation(shared) => shared.into(),
            internal @ NoteError::Internal { .. } => {
                tracing::error!(error = ?internal, "Note operation failed");
                Self::internal(internal.to_string())
            }
        }
    }
}

impl From<AuthError> for BackendError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserExists => Self::UserExists,
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::UnknownUser(_) => Self::unauthorized("Account no longer exists"),
            AuthError::InvalidToken(_) => Self::unauthorized("Invalid or expired token"),
            AuthError::Validation(shared) => shared.into(),
            internal => {
                tracing::error!(error = ?internal, "Auth operation failed");
                Self::internal(internal.to_string())
            }
        }
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        Self::Validation {
            target: err.field().map(str::to_string),
            message: err.detail().to_string(),
        }
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(Some("body".to_string()), rejection.body_text())
    }
}
