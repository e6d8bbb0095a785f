// Auth Service Library
//
// Registration, login and token validation over HTTP.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod security;
pub mod telemetry;

pub use error::{AuthError, AuthResult};

use crypto_core::JwtKeys;
use std::sync::Arc;

/// Shared application state, built once in `main`
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub jwt: Arc<JwtKeys>,
}
