//! Process configuration from environment variables.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The token-signing secret is mandatory. A missing secret must never
    /// degrade into a permissive or dev-default mode.
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingSecret,
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HS256 signing secret for tokens.
    pub jwt_secret: String,
    /// Listen address, `BIND_ADDR`, default `0.0.0.0:8080`.
    pub bind_addr: String,
    /// Postgres connection string, `DATABASE_URL`. Absent means the
    /// in-memory store (local development).
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        Ok(Self {
            jwt_secret,
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            database_url: std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
        })
    }
}
