/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds the two services handlers talk to (`NoteService`,
 * `AuthService`), the optional database pool (for health checks) and the
 * loaded configuration. The services own their stores behind `Arc<dyn ...>`,
 * so the same handlers run against PostgreSQL or the in-memory stores.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 *
 * ```rust,no_run
 * use axum::extract::State;
 * use notekeep::backend::notes::NoteService;
 *
 * async fn handler(State(notes): State<NoteService>) {
 *     // ...
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::auth::service::AuthService;
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::auth::users::{InMemoryUserStore, PgUserStore, UserStore};
use crate::backend::notes::memory_store::InMemoryNoteStore;
use crate::backend::notes::pg_store::PgNoteStore;
use crate::backend::notes::service::NoteService;
use crate::backend::notes::store::NoteStore;
use crate::shared::AppConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub notes: NoteService,
    pub auth: AuthService,

    /// Database connection pool
    ///
    /// `None` when the server runs on the in-memory stores.
    pub db_pool: Option<PgPool>,

    pub config: Arc<AppConfig>,
}

impl AppState {
    /// State backed by PostgreSQL
    pub fn with_postgres(pool: PgPool, config: AppConfig) -> Self {
        Self::assemble(
            Arc::new(PgNoteStore::new(pool.clone())),
            Arc::new(PgUserStore::new(pool.clone())),
            Some(pool),
            config,
        )
    }

    /// State backed by process-local stores; data is lost on restart
    pub fn in_memory(config: AppConfig) -> Self {
        Self::assemble(
            Arc::new(InMemoryNoteStore::new()),
            Arc::new(InMemoryUserStore::new()),
            None,
            config,
        )
    }

    fn assemble(
        notes: Arc<dyn NoteStore>,
        users: Arc<dyn UserStore>,
        db_pool: Option<PgPool>,
        config: AppConfig,
    ) -> Self {
        let tokens = TokenIssuer::from_config(&config.jwt);
        Self {
            notes: NoteService::new(notes),
            auth: AuthService::new(users, tokens, config.auth.bcrypt_cost),
            db_pool,
            config: Arc::new(config),
        }
    }

    /// Name of the storage backend, for logs and `/health`
    pub fn storage_backend(&self) -> &'static str {
        if self.db_pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }
}

impl FromRef<AppState> for NoteService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.notes.clone()
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

/// Implement FromRef for Option<PgPool>
///
/// This allows Axum handlers to extract the optional database pool
/// directly from `AppState`.
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
