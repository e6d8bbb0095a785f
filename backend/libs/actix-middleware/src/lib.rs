//! # Actix Middleware Library
//!
//! Shared middleware components for the actix services
//!
//! ## Modules
//! - `token_validation`: bearer token check delegated to the auth service
//! - `auth_client`: HTTP client for the auth service `/validate` endpoint
//! - `correlation_id`: X-Correlation-ID extraction and propagation

pub mod auth_client;
pub mod correlation_id;
pub mod token_validation;

pub use auth_client::{AuthServiceClient, ValidateTokenResponse, ValidationError};
pub use correlation_id::{CorrelationId, CorrelationIdMiddleware, CORRELATION_ID_HEADER};
pub use token_validation::{bearer_token, AuthenticatedUser, TokenValidationMiddleware};
