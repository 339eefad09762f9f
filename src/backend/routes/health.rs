//! `GET /health`
//!
//! Reports the storage backend and, with PostgreSQL, whether a trivial query
//! gets through. Answers 503 when the database is unreachable so load
//! balancers take the instance out of rotation.

use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::backend::middleware::RequestId;
use crate::backend::response::ApiResponse;
use crate::backend::server::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub storage: String,
    pub version: String,
}

pub async fn health(
    State(app_state): State<AppState>,
    request_id: RequestId,
) -> ApiResponse<HealthStatus> {
    let healthy = match &app_state.db_pool {
        Some(pool) => match sqlx::query("SELECT 1").execute(pool).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("Health check query failed: {:?}", e);
                false
            }
        },
        None => true,
    };

    let body = HealthStatus {
        status: if healthy { "ok" } else { "unavailable" }.to_string(),
        storage: app_state.storage_backend().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    ApiResponse::with_status(status, body, request_id)
}
