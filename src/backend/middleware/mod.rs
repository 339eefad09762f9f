//! Middleware Module
//!
//! This module contains all HTTP middleware for the backend server.
//!
//! - **`request_id`** - Tags each request with an id and echoes it as `x-request-id`
//! - **`auth`** - Bearer token authentication for protected routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use notekeep::backend::middleware::{auth_middleware, request_id_middleware};
//! use notekeep::backend::auth::AuthService;
//!
//! fn protect(router: Router, auth: AuthService) -> Router {
//!     router
//!         .route_layer(middleware::from_fn_with_state(auth, auth_middleware))
//!         .layer(middleware::from_fn(request_id_middleware))
//! }
//! ```

pub mod auth;
pub mod request_id;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
