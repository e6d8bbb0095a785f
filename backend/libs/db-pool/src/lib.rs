//! Database connection pool management
//!
//! Provides unified database pool creation and configuration for all services.
//! Connection settings come from the `DB_*` environment variables shared by
//! the auth and todo services.

use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Debug, thiserror::Error)]
pub enum DbConfigError {
    #[error("invalid database environment: {0}")]
    Env(#[from] envy::Error),

    #[error("invalid DB_SSL_MODE '{0}'")]
    InvalidSslMode(String),
}

/// Raw `DB_*` variables as read from the environment
#[derive(Deserialize)]
struct DbSettings {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_user")]
    user: String,
    #[serde(default)]
    password: String,
    #[serde(default = "default_name")]
    name: String,
    #[serde(default = "default_ssl_mode")]
    ssl_mode: String,
    #[serde(default = "default_max_connections")]
    max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    acquire_timeout_secs: u64,
}

/// Database connection pool configuration
#[derive(Clone)]
pub struct DbConfig {
    /// Service name for log labeling
    pub service_name: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Database name (`DB_NAME`)
    pub database: String,
    pub ssl_mode: PgSslMode,
    /// Maximum number of connections
    pub max_connections: u32,
    /// Connection acquisition timeout (get connection from pool)
    pub acquire_timeout_secs: u64,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("service_name", &self.service_name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("database", &self.database)
            .field("ssl_mode", &self.ssl_mode)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

impl DbConfig {
    /// Create a new DbConfig from the process environment
    pub fn from_env(service_name: &str) -> Result<Self, DbConfigError> {
        Self::from_vars(service_name, std::env::vars())
    }

    /// Create a DbConfig from an explicit set of `(name, value)` pairs
    pub fn from_vars<I>(service_name: &str, vars: I) -> Result<Self, DbConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let settings: DbSettings = envy::prefixed("DB_").from_iter(vars)?;
        let ssl_mode = PgSslMode::from_str(&settings.ssl_mode)
            .map_err(|_| DbConfigError::InvalidSslMode(settings.ssl_mode.clone()))?;

        Ok(Self {
            service_name: service_name.to_string(),
            host: settings.host,
            port: settings.port,
            user: settings.user,
            password: settings.password,
            database: settings.name,
            ssl_mode,
            max_connections: settings.max_connections,
            acquire_timeout_secs: settings.acquire_timeout_secs,
        })
    }

    /// Connection options equivalent to
    /// `host=.. port=.. user=.. password=.. dbname=.. sslmode=..`
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .ssl_mode(self.ssl_mode)
    }

    /// Log pool configuration details
    pub fn log_config(&self) {
        info!(
            service = %self.service_name,
            host = %self.host,
            port = self.port,
            database = %self.database,
            max_connections = self.max_connections,
            acquire_timeout_secs = self.acquire_timeout_secs,
            "Database Pool Configuration"
        );
    }
}

/// Create a PostgreSQL connection pool and verify it with `SELECT 1`
pub async fn create_pool(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    debug!(
        service = %config.service_name,
        max = config.max_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "Creating database pool"
    );

    let acquire_timeout = Duration::from_secs(config.acquire_timeout_secs);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_with(config.connect_options())
        .await?;

    match tokio::time::timeout(acquire_timeout, sqlx::query("SELECT 1").execute(&pool)).await {
        Ok(Ok(_)) => {
            info!(
                service = %config.service_name,
                "Database pool created and verified successfully"
            );
            Ok(pool)
        }
        Ok(Err(e)) => {
            error!(
                service = %config.service_name,
                error = %e,
                "Database connection verification failed"
            );
            Err(e)
        }
        Err(_) => {
            error!(
                service = %config.service_name,
                timeout_secs = config.acquire_timeout_secs,
                "Database connection verification timeout"
            );
            Err(sqlx::Error::PoolTimedOut)
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_user() -> String {
    "postgres".to_string()
}

fn default_name() -> String {
    "postgres".to_string()
}

fn default_ssl_mode() -> String {
    "disable".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = DbConfig::from_vars("test-service", vars(&[])).unwrap();

        assert_eq!(config.service_name, "test-service");
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.user, "postgres");
        assert_eq!(config.password, "");
        assert_eq!(config.database, "postgres");
        assert!(matches!(config.ssl_mode, PgSslMode::Disable));
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.acquire_timeout_secs, 10);
    }

    #[test]
    fn test_reads_db_prefixed_variables() {
        let config = DbConfig::from_vars(
            "auth-service",
            vars(&[
                ("DB_HOST", "db.internal"),
                ("DB_PORT", "6543"),
                ("DB_USER", "todo"),
                ("DB_PASSWORD", "p@ss word"),
                ("DB_NAME", "todos"),
                ("DB_MAX_CONNECTIONS", "3"),
                ("UNRELATED", "ignored"),
            ]),
        )
        .unwrap();

        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6543);
        assert_eq!(config.user, "todo");
        assert_eq!(config.password, "p@ss word");
        assert_eq!(config.database, "todos");
        assert_eq!(config.max_connections, 3);
    }

    #[test]
    fn test_invalid_port_rejected() {
        let result = DbConfig::from_vars("svc", vars(&[("DB_PORT", "not-a-port")]));
        assert!(matches!(result, Err(DbConfigError::Env(_))));
    }

    #[test]
    fn test_invalid_ssl_mode_rejected() {
        let result = DbConfig::from_vars("svc", vars(&[("DB_SSL_MODE", "sometimes")]));
        assert!(matches!(result, Err(DbConfigError::InvalidSslMode(_))));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config =
            DbConfig::from_vars("svc", vars(&[("DB_PASSWORD", "hunter2")])).unwrap();
        let rendered = format!("{:?}", config);

        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("hunter2"));
    }
}
