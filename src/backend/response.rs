//! Response envelopes
//!
//! Every JSON response carries the request id and a server timestamp next to
//! the payload:
//!
//! ```json
//! { "data": { ... }, "requestId": "...", "timestamp": "..." }
//! ```
//!
//! Failures use `ErrorEnvelope` (see `backend::error::conversion`).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::middleware::request_id::RequestId;

/// Success envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub data: T,
    pub request_id: RequestId,
    pub timestamp: DateTime<Utc>,
}

/// One entry of an error envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Failure envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub errors: Vec<ApiErrorBody>,
    pub request_id: RequestId,
    pub timestamp: DateTime<Utc>,
}

impl ErrorEnvelope {
    pub fn new(errors: Vec<ApiErrorBody>, request_id: RequestId) -> Self {
        Self {
            errors,
            request_id,
            timestamp: Utc::now(),
        }
    }
}

/// A successful handler result: status plus enveloped payload
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    data: T,
    request_id: RequestId,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T, request_id: RequestId) -> Self {
        Self {
            status: StatusCode::OK,
            data,
            request_id,
        }
    }

    pub fn created(data: T, request_id: RequestId) -> Self {
        Self::with_status(StatusCode::CREATED, data, request_id)
    }

    pub fn with_status(status: StatusCode, data: T, request_id: RequestId) -> Self {
        Self {
            status,
            data,
            request_id,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = Envelope {
            data: self.data,
            request_id: self.request_id,
            timestamp: Utc::now(),
        };
        (self.status, Json(body)).into_response()
    }
}
