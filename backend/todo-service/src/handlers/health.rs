//! Readiness endpoint
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::AppState;

const SERVICE_NAME: &str = "todo-service";

pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let (status, body_status) = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => (actix_web::http::StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            (actix_web::http::StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        }
    };

    HttpResponse::build(status).json(json!({
        "status": body_status,
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
