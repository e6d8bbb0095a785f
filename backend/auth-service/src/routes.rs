/// Route table for the auth service
use actix_web::{web, HttpRequest};

use crate::{error::AuthError, handlers};

/// JSON extractor settings: any content type, bad bodies become 400 with `message`
pub fn json_config(message: &'static str) -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(move |err, _req: &HttpRequest| {
            tracing::debug!(error = %err, "rejected request body");
            AuthError::BadRequest(message.to_string()).into()
        })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/ping", web::get().to(handlers::ping))
        .route("/health", web::get().to(handlers::health))
        .service(
            web::resource("/register")
                .app_data(json_config("Invalid input"))
                .route(web::post().to(handlers::register)),
        )
        .service(
            web::resource("/login")
                .app_data(json_config("Invalid input"))
                .route(web::post().to(handlers::login)),
        )
        .service(
            web::resource("/validate")
                .app_data(json_config("invalid request"))
                .route(web::post().to(handlers::validate)),
        )
        .service(
            web::resource("/user-id")
                .app_data(json_config("invalid request"))
                .route(web::post().to(handlers::user_id)),
        );
}
