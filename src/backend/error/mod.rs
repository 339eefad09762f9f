//! Backend Error Module
//!
//! This module defines the error types the HTTP layer returns. Domain errors
//! convert into `BackendError`; handlers attach the request id with
//! `InRequest::in_request` and return `ApiError`.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and conversions from domain errors
//! └── conversion.rs - ApiError and IntoResponse implementations
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use notekeep::backend::error::{ApiError, InRequest};
//! use notekeep::backend::middleware::RequestId;
//! use notekeep::shared::NoteId;
//!
//! fn parse(raw: &str, request_id: &RequestId) -> Result<NoteId, ApiError> {
//!     NoteId::parse(raw).in_request(request_id)
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
pub use conversion::{ApiError, InRequest};
