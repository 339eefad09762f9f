//! Authentication Module
//!
//! This module handles user registration, login and session tokens. Note
//! handlers never look at tokens themselves: `auth_middleware` resolves the
//! bearer token to an `AuthenticatedUser` and handlers pass its `UserId`
//! explicitly to the note service.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model, UserStore trait, Postgres and in-memory stores
//! ├── sessions.rs     - JWT token management (TokenIssuer)
//! ├── service.rs      - AuthService: register, login, password change
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt (configurable cost) before storage
//! - JWT tokens are HS256 and expire after the configured TTL (24h default)
//! - Invalid credentials return 401 without saying which part was wrong

/// User data model and identity stores
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// Registration, login and password management
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{change_password, get_me, login, register};
pub use service::{AuthError, AuthService, AuthSession};
pub use sessions::{Claims, TokenError, TokenIssuer};
pub use users::{InMemoryUserStore, PgUserStore, User, UserStore, UserStoreError};
