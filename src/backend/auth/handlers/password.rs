/**
 * Change Password Handler
 *
 * PUT /api/v1/auth/password. Requires the current password; tokens issued
 * before the change stay valid until they expire.
 */

use axum::extract::{rejection::JsonRejection, State};
use axum::http::StatusCode;
use axum::response::Json;

use crate::backend::auth::handlers::types::ChangePasswordRequest;
use crate::backend::auth::service::AuthService;
use crate::backend::error::{ApiError, InRequest};
use crate::backend::middleware::{AuthUser, RequestId};

/// Change password handler
///
/// # Errors
///
/// * `400 VALIDATION_ERROR` - Malformed body or new password too short
/// * `401 INVALID_CREDENTIALS` - Current password is wrong
pub async fn change_password(
    State(auth): State<AuthService>,
    request_id: RequestId,
    AuthUser(user): AuthUser,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload.in_request(&request_id)?;

    auth.change_password(user.user_id, &request.current_password, &request.new_password)
        .await
        .in_request(&request_id)?;

    Ok(StatusCode::NO_CONTENT)
}
