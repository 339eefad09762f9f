//! Backend Module
//!
//! This module contains all server-side code for notekeep: an Axum HTTP
//! server for versioned, shared notes.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Application state, database setup, initialization
//! - **`routes`** - Router assembly, CORS, tracing, health check
//! - **`notes`** - Access policy, note stores, `NoteService`, note handlers
//! - **`auth`** - Users, JWT sessions, `AuthService`, auth handlers
//! - **`middleware`** - Request ids and bearer authentication
//! - **`response`** - Success envelopes
//! - **`error`** - `BackendError` and error envelopes
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - notekeep-server binary
//! ├── migrate.rs      - notekeep-migrate binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── notes/          - Notes domain and handlers
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── response.rs     - Response envelopes
//! └── error/          - Error types
//! ```
//!
//! # Concurrency
//!
//! Handlers share no mutable state of their own. Concurrent edits to the same
//! note are settled by the store's compare-and-swap on `(id, version)`; the
//! loser gets `409 VERSION_CONFLICT` and must re-read before retrying.
//!
//! # Error Handling
//!
//! Domain errors (`NoteError`, `AuthError`, `SharedError`) convert into
//! `BackendError`; handlers tag them with the request id and return
//! `ApiError`, which renders the error envelope.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Notes domain
pub mod notes;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Response envelopes
pub mod response;

/// Backend error types
pub mod error;

pub use error::{ApiError, BackendError};
pub use server::create_app;
