/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /api/v1/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate email format and password length
 * 2. Check if user already exists
 * 3. Hash password using bcrypt
 * 4. Create user in the identity store
 * 5. Generate JWT token
 * 6. Return token and user info
 *
 * # Validation
 *
 * - Email must contain '@' character (basic validation)
 * - Password must be at least 8 characters long
 * - Email must be unique (case-insensitive)
 */

use axum::extract::{rejection::JsonRejection, State};
use axum::response::Json;

use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest};
use crate::backend::auth::service::AuthService;
use crate::backend::error::{ApiError, InRequest};
use crate::backend::middleware::RequestId;
use crate::backend::response::ApiResponse;

/// Register handler
///
/// # Errors
///
/// * `400 VALIDATION_ERROR` - Malformed body, invalid email or short password
/// * `409 USER_EXISTS` - An account with this email already exists
/// * `500 INTERNAL_ERROR` - Hashing, store or token failure
///
/// # Example Request
///
/// ```http
/// POST /api/v1/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "securepassword123"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "data": {
///     "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///     "user": { "id": "123e4567-...", "email": "user@example.com", "created_at": "..." }
///   },
///   "requestId": "...",
///   "timestamp": "..."
/// }
/// ```
pub async fn register(
    State(auth): State<AuthService>,
    request_id: RequestId,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiResponse<AuthResponse>, ApiError> {
    let Json(request) = payload.in_request(&request_id)?;

    let session = auth
        .register(&request.email, &request.password)
        .await
        .in_request(&request_id)?;

    Ok(ApiResponse::created(session.into(), request_id))
}
