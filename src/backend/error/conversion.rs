/**
 * Error Conversion
 *
 * `IntoResponse` implementations for backend errors. Both produce the error
 * envelope:
 *
 * ```json
 * {
 *   "errors": [{ "code": "VERSION_CONFLICT", "message": "...", "target": "version" }],
 *   "requestId": "5f0c...",
 *   "timestamp": "2024-05-01T10:00:00Z"
 * }
 * ```
 *
 * `ApiError` carries the request id of the request that failed. A bare
 * `BackendError` returned from somewhere without request context gets a
 * fresh id.
 */

use axum::{
    http::HeaderValue,
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::BackendError;
use crate::backend::middleware::request_id::{RequestId, REQUEST_ID_HEADER};
use crate::backend::response::{ApiErrorBody, ErrorEnvelope};

/// A backend error tied to the request it answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub request_id: RequestId,
    pub error: BackendError,
}

impl ApiError {
    pub fn new(request_id: RequestId, error: impl Into<BackendError>) -> Self {
        Self {
            request_id,
            error: error.into(),
        }
    }
}

/// Tag a fallible result with the current request id
pub trait InRequest<T> {
    fn in_request(self, request_id: &RequestId) -> Result<T, ApiError>;
}

impl<T, E: Into<BackendError>> InRequest<T> for Result<T, E> {
    fn in_request(self, request_id: &RequestId) -> Result<T, ApiError> {
        self.map_err(|err| ApiError::new(request_id.clone(), err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        if status.is_client_error() {
            tracing::debug!(request_id = %self.request_id, code = self.error.code(), "Request rejected");
        }

        let body = ErrorEnvelope::new(
            vec![ApiErrorBody {
                code: self.error.code().to_string(),
                message: self.error.message(),
                target: self.error.target(),
            }],
            self.request_id.clone(),
        );

        let mut response = (status, Json(body)).into_response();
        if let Ok(value) = HeaderValue::from_str(self.request_id.as_str()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        ApiError::new(RequestId::generate(), self).into_response()
    }
}
