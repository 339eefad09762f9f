//! Routes Module
//!
//! This module assembles the HTTP surface: the `/api/v1` routes, the health
//! check, the fallback and the tower layers around them.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - create_router, CORS and layer order
//! ├── api_routes.rs   - /api/v1 auth and note routes
//! └── health.rs       - GET /health
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use notekeep::backend::routes::create_router;
//! use notekeep::backend::server::AppState;
//! use notekeep::shared::AppConfig;
//!
//! let router = create_router(AppState::in_memory(AppConfig::default()));
//! ```

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

/// Health check
pub mod health;

pub use router::create_router;
