//! Auth service
//!
//! Registration, login, password changes and token authentication on top of
//! a `UserStore` and a `TokenIssuer`. Password hashing runs on the blocking
//! pool; bcrypt at production cost takes long enough to stall a runtime
//! worker otherwise.

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::auth::users::{NewUser, User, UserStore, UserStoreError};
use crate::shared::{SharedError, UserId};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("user already exists")]
    UserExists,

    /// Unknown email or wrong password; deliberately indistinguishable
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Token is valid but its user is gone
    #[error("user {0} no longer exists")]
    UnknownUser(UserId),

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error(transparent)]
    Validation(#[from] SharedError),

    #[error("{context}")]
    Internal {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl AuthError {
    fn internal(context: &str, source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Internal {
            context: context.to_string(),
            source: Box::new(source),
        }
    }
}

impl From<UserStoreError> for AuthError {
    fn from(err: UserStoreError) -> Self {
        match err {
            UserStoreError::DuplicateEmail(_) => AuthError::UserExists,
            other => AuthError::internal("user store failure", other),
        }
    }
}

/// A freshly issued token and the user it belongs to
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenIssuer,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenIssuer, bcrypt_cost: u32) -> Self {
        Self {
            users,
            tokens,
            bcrypt_cost,
        }
    }

    /// Create an account and sign it in
    pub async fn register(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let email = normalize_email(email)?;
        validate_password(password)?;

        if self.users.get_by_email(&email).await?.is_some() {
            tracing::warn!("Registration for existing email rejected");
            return Err(AuthError::UserExists);
        }

        let password_hash = self.hash_password(password).await?;
        let user = self
            .users
            .create(NewUser {
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        self.session_for(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.users.get_by_email(&email).await? else {
            tracing::warn!("Login for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.verify_password(password, &user.password_hash).await? {
            tracing::warn!(user_id = %user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "User logged in");
        self.session_for(user)
    }

    pub async fn current_user(&self, id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(id)
            .await?
            .ok_or(AuthError::UnknownUser(id))
    }

    /// Resolve a bearer token to the user it was issued for
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let user_id = self.tokens.user_id(token).map_err(AuthError::InvalidToken)?;
        self.current_user(user_id).await
    }

    pub async fn change_password(
        &self,
        id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let mut user = self.current_user(id).await?;
        if !self.verify_password(current_password, &user.password_hash).await? {
            tracing::warn!(user_id = %id, "Password change with wrong current password");
            return Err(AuthError::InvalidCredentials);
        }
        validate_password(new_password)?;

        user.password_hash = self.hash_password(new_password).await?;
        self.users.update(&user).await?;

        tracing::info!(user_id = %id, "Password changed");
        Ok(())
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    fn session_for(&self, user: User) -> Result<AuthSession, AuthError> {
        let token = self
            .tokens
            .issue(user.id, &user.email)
            .map_err(|e| AuthError::internal("failed to issue token", e))?;
        Ok(AuthSession { token, user })
    }

    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AuthError::internal("password hashing task failed", e))?
            .map_err(|e| AuthError::internal("failed to hash password", e))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AuthError::internal("password verification task failed", e))?
            .map_err(|e| AuthError::internal("failed to verify password", e))
    }
}

/// Trim and lowercase; requires an '@'
fn normalize_email(email: &str) -> Result<String, SharedError> {
    let email = email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(SharedError::validation("email", "Invalid email format"));
    }
    Ok(email)
}

fn validate_password(password: &str) -> Result<(), SharedError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}
