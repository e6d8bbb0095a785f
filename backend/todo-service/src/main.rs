/// Todo Service - Main entry point
use actix_middleware::{AuthServiceClient, CorrelationIdMiddleware, TokenValidationMiddleware};
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use db_pool::create_pool;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use todo_service::{config::Config, db, routes, telemetry, AppState};

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = Config::from_env().context("Failed to load configuration from environment")?;
    tracing::info!(
        "Starting todo-service on {}:{}",
        config.server_host,
        config.server_port
    );

    config.database.log_config();
    let pool = create_pool(&config.database)
        .await
        .context("Failed to create database pool")?;

    db::ensure_schema(&pool)
        .await
        .context("Failed to ensure todos table")?;

    let auth_client = AuthServiceClient::new(
        config.auth_validation_url.clone(),
        config.validation_timeout(),
    )
    .context("Failed to build auth service client")?;
    tracing::info!(
        url = %config.auth_validation_url,
        timeout_ms = config.auth_validation_timeout_ms,
        "Token validation delegated to auth service"
    );
    let gateway = TokenValidationMiddleware::new(Arc::new(auth_client));

    let state = web::Data::new(AppState { db: pool });

    HttpServer::new(move || {
        let gateway = gateway.clone();
        App::new()
            .app_data(state.clone())
            .wrap(CorrelationIdMiddleware)
            .wrap(TracingLogger::default())
            .configure(|cfg| routes::configure(cfg, gateway))
    })
    .bind(config.bind_address())
    .context("Failed to bind HTTP listener")?
    .run()
    .await
    .context("HTTP server error")?;

    tracing::info!("todo-service stopped");
    Ok(())
}
