/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/v1/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Verify password using bcrypt
 * 3. Generate JWT token
 * 4. Return token and user info
 *
 * Unknown email and wrong password produce the same `INVALID_CREDENTIALS`
 * response.
 */

use axum::extract::{rejection::JsonRejection, State};
use axum::response::Json;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::service::AuthService;
use crate::backend::error::{ApiError, InRequest};
use crate::backend::middleware::RequestId;
use crate::backend::response::ApiResponse;

/// Login handler
///
/// # Errors
///
/// * `400 VALIDATION_ERROR` - Malformed body
/// * `401 INVALID_CREDENTIALS` - Unknown email or wrong password
/// * `500 INTERNAL_ERROR` - Store or token failure
pub async fn login(
    State(auth): State<AuthService>,
    request_id: RequestId,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiResponse<AuthResponse>, ApiError> {
    let Json(request) = payload.in_request(&request_id)?;

    let session = auth
        .login(&request.email, &request.password)
        .await
        .in_request(&request_id)?;

    Ok(ApiResponse::ok(session.into(), request_id))
}
