/// Auth Service - Main entry point
use actix_middleware::CorrelationIdMiddleware;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use chrono::Duration;
use crypto_core::JwtKeys;
use db_pool::create_pool;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use auth_service::{config::Config, db, routes, telemetry, AppState};

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = Config::from_env().context("Failed to load configuration from environment")?;
    tracing::info!(
        "Starting auth-service on {}:{}",
        config.server_host,
        config.server_port
    );

    let ttl =
        Duration::try_hours(config.token_ttl_hours).context("TOKEN_TTL_HOURS out of range")?;
    let jwt = JwtKeys::from_secret(config.jwt_secret.as_bytes(), ttl)
        .context("Failed to initialize JWT keys")?;
    tracing::info!(ttl_hours = jwt.ttl().num_hours(), "JWT keys initialized");

    config.database.log_config();
    let pool = create_pool(&config.database)
        .await
        .context("Failed to create database pool")?;

    db::ensure_schema(&pool)
        .await
        .context("Failed to ensure users table")?;

    let state = web::Data::new(AppState {
        db: pool,
        jwt: Arc::new(jwt),
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(CorrelationIdMiddleware)
            .wrap(TracingLogger::default())
            .configure(routes::configure)
    })
    .bind(config.bind_address())
    .context("Failed to bind HTTP listener")?
    .run()
    .await
    .context("HTTP server error")?;

    tracing::info!("auth-service stopped");
    Ok(())
}
