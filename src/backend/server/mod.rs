//! Server Module
//!
//! This module contains the code that assembles the Axum application:
//! application state, database setup and startup.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database pool and embedded migrations
//! ├── migrations.rs   - Migration status and rollback helpers
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use notekeep::backend::server::create_app;
//! use notekeep::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::load()?).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Database pool and migrations
pub mod config;

/// Migration status and rollback
pub mod migrations;

/// Server initialization
pub mod init;

pub use init::create_app;
pub use state::AppState;
