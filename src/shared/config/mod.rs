//! Application configuration module
//!
//! Configuration is resolved in three layers, later layers winning:
//!
//! 1. Built-in defaults (suitable for local development)
//! 2. An optional TOML file (`NOTEKEEP_CONFIG`, else `./notekeep.toml` if present)
//! 3. Environment variables (`SERVER_PORT`, `DATABASE_URL`, `JWT_SECRET`, ...)
//!
//! # Example
//!
//! ```rust
//! use notekeep::shared::config::AppConfig;
//!
//! let config = AppConfig::builder()
//!     .port(9000)
//!     .jwt_secret("test-secret")
//!     .build()
//!     .unwrap();
//! assert_eq!(config.server.port, 9000);
//! ```

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "NOTEKEEP_CONFIG";

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "notekeep.toml";

const DEFAULT_JWT_SECRET: &str = "your-secret-key";

/// Longest accepted token lifetime (one leap year)
pub const MAX_JWT_TTL_HOURS: i64 = 24 * 366;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub auth: AuthConfig,
}

/// HTTP listener and CORS settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS (the web frontend)
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

/// PostgreSQL settings
///
/// `url` is `None` when no database is configured; the server then falls
/// back to in-memory stores.
#[derive(Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 25,
            acquire_timeout_secs: 5,
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_deref().map(redact_url))
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

/// Token signing settings
#[derive(Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_JWT_SECRET.to_string(),
            ttl_hours: 24,
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"****")
            .field("ttl_hours", &self.ttl_hours)
            .finish()
    }
}

/// Password hashing settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        // bcrypt::DEFAULT_COST
        Self { bcrypt_cost: 12 }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Resolve configuration from defaults, the optional config file and the
    /// process environment
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_file_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay environment variables read through `lookup`
    ///
    /// `DATABASE_URL` wins over the `DB_*` parts; the parts are only used
    /// when at least `DB_HOST` or `DB_NAME` is present.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(host) = get("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("SERVER_PORT") {
            self.server.port = parse_number("SERVER_PORT", &port)?;
        }
        if let Some(origins) = get("FRONTEND_URL") {
            self.server.allowed_origins = origins
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect();
        }

        if let Some(url) = get("DATABASE_URL") {
            self.database.url = Some(url);
        } else if get("DB_HOST").is_some() || get("DB_NAME").is_some() {
            let port: u16 = match get("DB_PORT") {
                Some(port) => parse_number("DB_PORT", &port)?,
                None => 5432,
            };
            self.database.url = Some(format!(
                "postgres://{}:{}@{}:{}/{}",
                get("DB_USER").unwrap_or_else(|| "postgres".to_string()),
                get("DB_PASSWORD").unwrap_or_else(|| "postgres".to_string()),
                get("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
                port,
                get("DB_NAME").unwrap_or_else(|| "notes_app".to_string()),
            ));
        }
        if let Some(max) = get("DB_MAX_CONNECTIONS") {
            self.database.max_connections = parse_number("DB_MAX_CONNECTIONS", &max)?;
        }

        if let Some(secret) = get("JWT_SECRET") {
            self.jwt.secret = secret;
        }
        if let Some(ttl) = get("JWT_TTL_HOURS") {
            self.jwt.ttl_hours = parse_number("JWT_TTL_HOURS", &ttl)?;
        }
        if let Some(cost) = get("BCRYPT_COST") {
            self.auth.bcrypt_cost = parse_number("BCRYPT_COST", &cost)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::MissingValue("jwt.secret"));
        }
        if !(1..=MAX_JWT_TTL_HOURS).contains(&self.jwt.ttl_hours) {
            return Err(ConfigError::Invalid {
                key: "jwt.ttl_hours",
                message: format!(
                    "{} is outside the 1..={} range",
                    self.jwt.ttl_hours, MAX_JWT_TTL_HOURS
                ),
            });
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "auth.bcrypt_cost",
                message: format!("{} is outside bcrypt's 4..=31 range", self.auth.bcrypt_cost),
            });
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "database.max_connections",
                message: "must be at least 1".to_string(),
            });
        }
        if let Some(url) = &self.database.url {
            if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
                return Err(ConfigError::InvalidUrl(redact_url(url)));
            }
        }
        Ok(())
    }

    /// True when the development signing secret is still in use
    pub fn uses_default_secret(&self) -> bool {
        self.jwt.secret == DEFAULT_JWT_SECRET
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.server.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    pub fn allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.config.server.allowed_origins.push(origin.into());
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database.url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt.secret = secret.into();
        self
    }

    pub fn jwt_ttl_hours(mut self, hours: i64) -> Self {
        self.config.jwt.ttl_hours = hours;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.auth.bcrypt_cost = cost;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    default.exists().then_some(default)
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        message: format!("'{}' is not a number", raw),
    })
}

/// Hide the password part of a connection URL
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let credentials = &url[scheme_end + 3..at];
            match credentials.split_once(':') {
                Some((user, _)) => format!("{}{}:****{}", &url[..scheme_end + 3], user, &url[at..]),
                None => url.to_string(),
            }
        }
        _ => url.to_string(),
    }
}
