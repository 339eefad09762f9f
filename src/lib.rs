//! notekeep - Main Library
//!
//! notekeep is a notes backend: users register and authenticate, then create
//! notes they share with collaborators. Concurrent edits are resolved with an
//! optimistic version check at the store, never by locking or merging.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no server dependencies
//!   - Note record and typed ids
//!   - Validation errors
//!   - Configuration
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Access-control policy and the conditional-update note store
//!   - Note service composing both
//!   - Authentication (bcrypt + JWT) and identity store
//!   - Axum routes, middleware, JSON envelopes
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend module and the server binaries
//!
//! # Usage
//!
//! ```rust,no_run
//! use notekeep::backend::server::init::create_app;
//! use notekeep::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Each request runs on its own Tokio task. The only shared, contended
//! resource is a note row, and writes to it go through a compare-and-swap on
//! `(id, version)` inside the store. The service holds no locks.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
