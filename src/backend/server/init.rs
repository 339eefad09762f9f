/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including storage selection and route configuration.
 *
 * # Initialization Process
 *
 * 1. Connect to PostgreSQL if configured and run migrations
 * 2. Build `AppState` on PostgreSQL or in-memory stores
 * 3. Create and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails only when a database is configured but cannot be reached.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, sqlx::Error> {
    tracing::info!("Initializing notekeep backend");

    let app_state = match load_database(&config.database).await? {
        Some(pool) => AppState::with_postgres(pool, config),
        None => AppState::in_memory(config),
    };

    tracing::info!(storage = app_state.storage_backend(), "Application state ready");
    Ok(create_router(app_state))
}
