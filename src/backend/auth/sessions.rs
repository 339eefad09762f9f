/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation for user sessions.
 * Tokens are HS256-signed; the secret and lifetime come from `JwtConfig`.
 */

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::config::{JwtConfig, MAX_JWT_TTL_HOURS};
use crate::shared::UserId;

/// Token issuing failures
#[derive(Debug, Error)]
pub enum TokenError {
    /// Issue time plus lifetime does not fit in a timestamp
    #[error("token lifetime overflows the expiry timestamp")]
    ExpiryOverflow,

    #[error("failed to encode token: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Lifetime is clamped to `1..=MAX_JWT_TTL_HOURS` hours
    pub fn from_config(config: &JwtConfig) -> Self {
        let hours = config.ttl_hours.clamp(1, MAX_JWT_TTL_HOURS);
        Self::new(&config.secret, Duration::hours(hours))
    }

    /// Create a JWT token for a user
    ///
    /// # Arguments
    /// * `user_id` - User ID
    /// * `email` - User email
    ///
    /// # Returns
    /// JWT token string
    pub fn issue(&self, user_id: UserId, email: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or(TokenError::ExpiryOverflow)?;
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: expires.timestamp().max(0) as u64,
            iat: now.timestamp().max(0) as u64,
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Verify and decode a JWT token
    ///
    /// Checks the signature and the `exp` claim.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(token_data.claims)
    }

    /// Extract user ID from token
    pub fn user_id(&self, token: &str) -> Result<UserId, String> {
        let claims = self
            .verify(token)
            .map_err(|e| format!("Token verification failed: {}", e))?;
        Uuid::parse_str(&claims.sub)
            .map(UserId)
            .map_err(|e| format!("Invalid user ID in token: {}", e))
    }
}
