//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request and response types
//! ├── register.rs  - User registration handler
//! ├── login.rs     - User authentication handler
//! ├── me.rs        - Get current user handler
//! └── password.rs  - Change password handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/v1/auth/register
//! - **`login`** - POST /api/v1/auth/login
//! - **`get_me`** - GET /api/v1/auth/me (bearer)
//! - **`change_password`** - PUT /api/v1/auth/password (bearer)

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

/// Change password handler
pub mod password;

pub use types::{AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, UserResponse};

pub use login::login;
pub use me::get_me;
pub use password::change_password;
pub use register::register;
