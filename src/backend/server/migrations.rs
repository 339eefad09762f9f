//! Migration status and rollback
//!
//! Thin helpers over the embedded `MIGRATOR`, shared by the server and the
//! `notekeep-migrate` binary.

use sqlx::migrate::MigrateError;
use sqlx::PgPool;

use crate::backend::server::config::MIGRATOR;

/// One known migration and whether the database has it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub version: i64,
    pub description: String,
    pub applied: bool,
}

/// Versions recorded as successfully applied, ascending
///
/// Empty when the bookkeeping table does not exist yet.
pub async fn applied_versions(pool: &PgPool) -> Result<Vec<i64>, sqlx::Error> {
    let table_exists: bool =
        sqlx::query_scalar("SELECT to_regclass('_sqlx_migrations') IS NOT NULL")
            .fetch_one(pool)
            .await?;
    if !table_exists {
        return Ok(Vec::new());
    }

    sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success ORDER BY version")
        .fetch_all(pool)
        .await
}

pub async fn status(pool: &PgPool) -> Result<Vec<MigrationStatus>, sqlx::Error> {
    let applied = applied_versions(pool).await?;

    Ok(MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .map(|m| MigrationStatus {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.contains(&m.version),
        })
        .collect())
}

/// Apply every pending migration
pub async fn run(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// Revert the newest `steps` applied migrations
///
/// Returns the reverted versions, newest first.
pub async fn revert(pool: &PgPool, steps: usize) -> Result<Vec<i64>, MigrateError> {
    let applied = applied_versions(pool).await?;
    let (target, reverted) = revert_plan(&applied, steps);
    if reverted.is_empty() {
        return Ok(reverted);
    }

    MIGRATOR.undo(pool, target).await?;
    Ok(reverted)
}

/// Target version for `Migrator::undo` and the versions it will revert
fn revert_plan(applied: &[i64], steps: usize) -> (i64, Vec<i64>) {
    let steps = steps.min(applied.len());
    let keep = applied.len() - steps;
    let target = if keep == 0 { 0 } else { applied[keep - 1] };
    let reverted = applied[keep..].iter().rev().copied().collect();
    (target, reverted)
}
