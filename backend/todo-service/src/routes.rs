/// Route table for the todo service
use actix_middleware::TokenValidationMiddleware;
use actix_web::{guard, web, HttpRequest, HttpResponse};

use crate::{error::AppError, handlers};

pub fn json_config(message: &'static str) -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(move |err, _req: &HttpRequest| {
            tracing::debug!(error = %err, "rejected request body");
            AppError::BadRequest(message.to_string()).into()
        })
}

/// Register routes; everything but `GET /todos` goes through `gateway`
///
/// Resources are guarded by method so an unsupported method falls through to
/// a plain 405 without a validation call.
pub fn configure(cfg: &mut web::ServiceConfig, gateway: TokenValidationMiddleware) {
    cfg.route("/health", web::get().to(handlers::health))
        .service(
            web::resource("/todos")
                .guard(guard::Get())
                .route(web::get().to(handlers::list_todos)),
        )
        .service(
            web::resource("/todos")
                .guard(guard::Post())
                .app_data(json_config("invalid request payload"))
                .wrap(gateway.clone())
                .route(web::post().to(handlers::create_todo)),
        )
        .service(
            web::resource("/todos/{id}")
                .guard(guard::Any(guard::Get()).or(guard::Put()).or(guard::Delete()))
                .wrap(gateway)
                .route(web::get().to(handlers::get_todo))
                .route(web::put().to(handlers::update_todo))
                .route(web::delete().to(handlers::delete_todo)),
        )
        .service(
            web::resource(["/todos", "/todos/{id}"])
                .default_service(web::to(|| async {
                    HttpResponse::MethodNotAllowed().finish()
                })),
        );
}
