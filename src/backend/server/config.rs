/**
 * Server Configuration
 *
 * This module turns the `database` section of `AppConfig` into a live
 * connection pool and brings the schema up to date.
 *
 * # Error Handling
 *
 * No configured database is not an error: the server falls back to the
 * in-memory stores and says so in the log. A configured database that
 * cannot be reached is an error; silently serving from memory would lose
 * every write on restart. Migration failures are logged and startup
 * continues, since the schema may already be current.
 */

use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::shared::config::DatabaseConfig;

/// Embedded migrations from `migrations/`
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Open a pool for `url` with the configured limits
pub async fn connect(config: &DatabaseConfig, url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(url)
        .await
}

/// Load and initialize database connection pool
///
/// This function:
/// 1. Reads the database URL from configuration
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs pending migrations
///
/// # Returns
///
/// - `Ok(Some(PgPool))` if the database is configured and reachable
/// - `Ok(None)` if no database is configured
/// - `Err` if a configured database cannot be reached
pub async fn load_database(config: &DatabaseConfig) -> Result<Option<PgPool>, sqlx::Error> {
    let Some(url) = config.url.as_deref() else {
        tracing::warn!("No database configured. Notes and users are kept in memory and lost on restart.");
        return Ok(None);
    };

    tracing::info!(max_connections = config.max_connections, "Connecting to database...");
    let pool = connect(config, url).await.inspect_err(|e| {
        tracing::error!("Failed to create database connection pool: {:?}", e);
    })?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match MIGRATOR.run(&pool).await {
        Ok(()) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Ok(Some(pool))
}
