//! HTTP client for the auth service `/validate` endpoint
//!
//! One client is built at startup and shared by every worker. Each call is a
//! single attempt: no retry, no caching of results.

use crate::correlation_id::CORRELATION_ID_HEADER;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("auth service unreachable: {0}")]
    Unreachable(String),

    #[error("auth service did not answer in time")]
    Timeout,

    #[error("auth service rejected token with status {0}")]
    Rejected(u16),

    #[error("auth service reported token as invalid")]
    NotValid,

    #[error("malformed validation response: {0}")]
    MalformedResponse(String),
}

impl ValidationError {
    /// Whether the caller should be answered with 401
    ///
    /// Transport failures are indistinguishable from an invalid token to the
    /// client; only an undecodable success body is a server-side fault.
    pub fn is_unauthorized(&self) -> bool {
        !matches!(self, ValidationError::MalformedResponse(_))
    }
}

#[derive(Debug, Serialize)]
struct ValidateTokenRequest<'a> {
    token: &'a str,
}

/// Body returned by `POST /validate`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidateTokenResponse {
    pub valid: bool,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AuthServiceClient {
    http: Client,
    validate_url: String,
}

impl AuthServiceClient {
    /// Build a client for `validate_url`; `None` leaves the call unbounded
    pub fn new(
        validate_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            validate_url: validate_url.into(),
        })
    }

    pub fn validate_url(&self) -> &str {
        &self.validate_url
    }

    /// Ask the auth service whether `token` is valid and return its username
    pub async fn validate(
        &self,
        token: &str,
        correlation_id: Option<&str>,
    ) -> Result<String, ValidationError> {
        let mut request = self
            .http
            .post(&self.validate_url)
            .json(&ValidateTokenRequest { token });
        if let Some(id) = correlation_id {
            request = request.header(CORRELATION_ID_HEADER, id);
        }

        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ValidationError::Rejected(status.as_u16()));
        }

        let body: ValidateTokenResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ValidationError::Timeout
            } else {
                ValidationError::MalformedResponse(e.to_string())
            }
        })?;

        if !body.valid {
            return Err(ValidationError::NotValid);
        }

        match body.username {
            Some(username) if !username.is_empty() => Ok(username),
            _ => Err(ValidationError::MalformedResponse(
                "username missing from successful validation".to_string(),
            )),
        }
    }
}

fn transport_error(e: reqwest::Error) -> ValidationError {
    if e.is_timeout() {
        ValidationError::Timeout
    } else {
        ValidationError::Unreachable(e.to_string())
    }
}
