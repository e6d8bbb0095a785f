/// Configuration management
use db_pool::{DbConfig, DbConfigError};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid environment: {0}")]
    Env(#[from] envy::Error),

    #[error(transparent)]
    Db(#[from] DbConfigError),

    #[error("AUTH_VALIDATION_URL must be set")]
    MissingValidationUrl,
}

#[derive(Deserialize)]
struct Settings {
    #[serde(default)]
    auth_validation_url: String,
    #[serde(default = "default_validation_timeout_ms")]
    auth_validation_timeout_ms: u64,
    #[serde(default = "default_host")]
    todo_service_host: String,
    #[serde(default = "default_port")]
    todo_service_port: u16,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Full URL of the auth service `/validate` endpoint
    pub auth_validation_url: String,
    /// Zero disables the timeout
    pub auth_validation_timeout_ms: u64,
    pub database: DbConfig,
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

        if settings.auth_validation_url.trim().is_empty() {
            return Err(ConfigError::MissingValidationUrl);
        }

        Ok(Self {
            server_host: settings.todo_service_host,
            server_port: settings.todo_service_port,
            auth_validation_url: settings.auth_validation_url,
            auth_validation_timeout_ms: settings.auth_validation_timeout_ms,
            database: DbConfig::from_vars("todo-service", vars)?,
        })
    }

    pub fn validation_timeout(&self) -> Option<Duration> {
        match self.auth_validation_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server_host.clone(), self.server_port)
    }
}

fn default_validation_timeout_ms() -> u64 {
    5000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}
