//! Bearer token validation middleware
//!
//! Guards resource routes by delegating token checks to the auth service over
//! HTTP. On success the caller's identity is stored in request extensions as
//! [`AuthenticatedUser`]; on any failure the request is answered here and the
//! wrapped handler never runs.

use crate::auth_client::AuthServiceClient;
use crate::correlation_id::CorrelationId;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::{header, StatusCode},
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures::future::LocalBoxFuture;
use serde_json::json;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

/// Identity established by the auth service for the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Extract the token from an `Authorization` header value
///
/// Accepts exactly `Bearer <token>`: the scheme is case-sensitive, separated by
/// a single space, and the token itself contains no spaces.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let mut parts = header_value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}

fn reject(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "error": message,
        "status": status.as_u16(),
    }))
}

/// Token Validation Middleware
#[derive(Clone)]
pub struct TokenValidationMiddleware {
    client: Arc<AuthServiceClient>,
}

impl TokenValidationMiddleware {
    pub fn new(client: Arc<AuthServiceClient>) -> Self {
        Self { client }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TokenValidationMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = TokenValidationMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenValidationMiddlewareService {
            service: Rc::new(service),
            client: self.client.clone(),
        }))
    }
}

pub struct TokenValidationMiddlewareService<S> {
    service: Rc<S>,
    client: Arc<AuthServiceClient>,
}

impl<S, B> Service<ServiceRequest> for TokenValidationMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let client = self.client.clone();

        Box::pin(async move {
            let token = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(bearer_token)
                .map(str::to_owned);

            let Some(token) = token else {
                tracing::debug!(path = %req.path(), "missing or malformed bearer token");
                let res = reject(StatusCode::UNAUTHORIZED, "Unauthorized");
                return Ok(req.into_response(res).map_into_right_body());
            };

            let correlation_id = req.extensions().get::<CorrelationId>().cloned();

            match client
                .validate(&token, correlation_id.as_ref().map(CorrelationId::as_str))
                .await
            {
                Ok(username) => {
                    tracing::debug!(username = %username, "token accepted by auth service");
                    req.extensions_mut()
                        .insert(AuthenticatedUser { username });
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(e) if e.is_unauthorized() => {
                    tracing::warn!(
                        error = %e,
                        auth_url = %client.validate_url(),
                        "token validation failed"
                    );
                    let res = reject(StatusCode::UNAUTHORIZED, "Unauthorized");
                    Ok(req.into_response(res).map_into_right_body())
                }
                Err(e) => {
                    tracing::error!(error = %e, "auth service returned an unusable response");
                    let res = reject(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
                    Ok(req.into_response(res).map_into_right_body())
                }
            }
        })
    }
}

/// FromRequest implementation for AuthenticatedUser
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "User not authenticated",
            ))),
        }
    }
}
