/// Configuration management
///
/// Values come from environment variables (optionally seeded from `.env`).
use db_pool::{DbConfig, DbConfigError};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid environment: {0}")]
    Env(#[from] envy::Error),

    #[error(transparent)]
    Db(#[from] DbConfigError),

    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingJwtSecret,

    #[error(
        "TOKEN_TTL_HOURS must be between 1 and {max}, got {0}",
        max = crypto_core::MAX_TOKEN_TTL_HOURS
    )]
    InvalidTokenTtl(i64),
}

#[derive(Deserialize)]
struct Settings {
    #[serde(default)]
    jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    token_ttl_hours: i64,
    #[serde(default = "default_host")]
    auth_service_host: String,
    #[serde(default = "default_port")]
    auth_service_port: u16,
}

#[derive(Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub database: DbConfig,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("database", &self.database)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();
        let settings: Settings = envy::from_iter(vars.clone())?;

        if settings.jwt_secret.is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }
        if !(1..=crypto_core::MAX_TOKEN_TTL_HOURS).contains(&settings.token_ttl_hours) {
            return Err(ConfigError::InvalidTokenTtl(settings.token_ttl_hours));
        }

        Ok(Self {
            server_host: settings.auth_service_host,
            server_port: settings.auth_service_port,
            jwt_secret: settings.jwt_secret,
            token_ttl_hours: settings.token_ttl_hours,
            database: DbConfig::from_vars("auth-service", vars)?,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server_host.clone(), self.server_port)
    }
}

fn default_token_ttl_hours() -> i64 {
    crypto_core::DEFAULT_TOKEN_TTL_HOURS
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}
