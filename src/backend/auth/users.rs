/**
 * User Model and Identity Store
 *
 * This module holds the user model and the `UserStore` trait with its two
 * implementations: `PgUserStore` (sqlx/PostgreSQL) and `InMemoryUserStore`
 * (used when no database is configured, and in tests).
 *
 * Emails are stored as given; callers normalize them first (see
 * `AuthService`). Lookups return `Ok(None)` when nothing matches.
 */

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::shared::UserId;

/// User as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: UserId,
    /// User email address (unique, lowercase)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    #[error("user {0} not found")]
    NotFound(UserId),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persistence for user identities
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, UserStoreError>;

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError>;

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError>;

    /// Persist `email` and `password_hash` of an existing user
    async fn update(&self, user: &User) -> Result<User, UserStoreError>;

    async fn delete(&self, id: UserId) -> Result<bool, UserStoreError>;
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId(row.id),
            email: row.email,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Map a unique-constraint violation on `users.email` to `DuplicateEmail`
fn map_insert_error(err: sqlx::Error, email: &str) -> UserStoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            UserStoreError::DuplicateEmail(email.to_string())
        }
        _ => UserStoreError::Database(err),
    }
}

/// User store over a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    /// Create a new user
    ///
    /// # Arguments
    /// * `user` - Email and already-hashed password
    ///
    /// # Returns
    /// Created user, or `DuplicateEmail` if the email is taken
    async fn create(&self, user: NewUser) -> Result<User, UserStoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, password_hash, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &user.email))?;

        Ok(row.into())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn update(&self, user: &User) -> Result<User, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET email = $1, password_hash = $2, updated_at = $3
            WHERE id = $4
            RETURNING id, email, password_hash, created_at, updated_at
            "#
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Utc::now())
        .bind(user.id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &user.email))?;

        row.map(User::from).ok_or(UserStoreError::NotFound(user.id))
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserStoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Process-local user store
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserStoreError::DuplicateEmail(user.email));
        }

        let now = Utc::now();
        let created = User {
            id: UserId::new(),
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn update(&self, user: &User) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|existing| existing.id != user.id && existing.email == user.email)
        {
            return Err(UserStoreError::DuplicateEmail(user.email.clone()));
        }

        let stored = users
            .get_mut(&user.id)
            .ok_or(UserStoreError::NotFound(user.id))?;
        stored.email = user.email.clone();
        stored.password_hash = user.password_hash.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserStoreError> {
        Ok(self.users.write().await.remove(&id).is_some())
    }
}
