/**
 * API Routes
 *
 * This module defines the `/api/v1` routes.
 *
 * # Routes
 *
 * ## Authentication (public)
 * - `POST /api/v1/auth/register` - User registration
 * - `POST /api/v1/auth/login` - User login
 *
 * ## Authentication (bearer)
 * - `GET /api/v1/auth/me` - Current user
 * - `PUT /api/v1/auth/password` - Change password
 *
 * ## Notes (bearer)
 * - `POST /api/v1/notes`, `GET /api/v1/notes`
 * - `GET|PUT|DELETE /api/v1/notes/{id}`
 */

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{change_password, get_me, login, register};
use crate::backend::middleware::auth_middleware;
use crate::backend::notes::{create_note, delete_note, get_note, list_notes, update_note};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// Protected routes get `auth_middleware` as a route layer, so unmatched
/// paths still fall through to the 404 fallback instead of answering 401.
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `app_state` - State handed to the auth middleware
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login));

    let protected = Router::new()
        .route("/api/v1/auth/me", get(get_me))
        .route("/api/v1/auth/password", put(change_password))
        .route("/api/v1/notes", post(create_note).get(list_notes))
        .route(
            "/api/v1/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.auth.clone(),
            auth_middleware,
        ));

    router.merge(public).merge(protected)
}
