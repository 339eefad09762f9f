/**
 * Get Current User Handler
 *
 * This module implements the handler for GET /api/v1/auth/me, which returns
 * information about the currently authenticated user.
 *
 * The route sits behind `auth_middleware`, so the handler receives the
 * verified identity through the `AuthUser` extractor.
 */

use axum::extract::State;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::service::AuthService;
use crate::backend::error::{ApiError, InRequest};
use crate::backend::middleware::{AuthUser, RequestId};
use crate::backend::response::ApiResponse;

/// Get current user handler
///
/// # Errors
///
/// * `401 UNAUTHORIZED` - Missing or invalid token, or the account is gone
///
/// # Example Response
///
/// ```json
/// {
///   "data": { "id": "123e4567-...", "email": "user@example.com", "created_at": "..." },
///   "requestId": "...",
///   "timestamp": "..."
/// }
/// ```
pub async fn get_me(
    State(auth): State<AuthService>,
    request_id: RequestId,
    AuthUser(user): AuthUser,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let user = auth.current_user(user.user_id).await.in_request(&request_id)?;
    Ok(ApiResponse::ok(user.into(), request_id))
}
