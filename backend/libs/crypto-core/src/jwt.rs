/// JWT issuance and validation shared by the auth service
///
/// Tokens are compact HS256 JWS strings carrying the username and an expiry.
/// The signing secret is loaded once at startup into [`JwtKeys`] and passed
/// explicitly to every component that signs or verifies tokens.
///
/// ## Security Design
///
/// - **HS256 ONLY**: validation pins the algorithm, so tokens signed with any
///   other algorithm are rejected even if the secret matches
/// - **Opaque failures**: every validation failure is reported as
///   [`JwtError::InvalidToken`]; callers never learn which check failed
/// - **Immutable keys**: `JwtKeys` has no setters and is shared behind `Arc`
///
/// ## Usage
///
/// ```rust
/// use chrono::Duration;
/// use crypto_core::jwt::JwtKeys;
///
/// let keys = JwtKeys::from_secret(b"change-me", Duration::hours(120)).unwrap();
/// let issued = keys.issue_token("bob").unwrap();
/// let claims = keys.validate_token(&issued.token).unwrap();
/// assert_eq!(claims.username, "bob");
/// ```
use chrono::{DateTime, Duration, Timelike, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Default token lifetime: five days
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24 * 5;

/// Upper bound on the token lifetime: one year
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Data Structures
// ============================================================================

/// Signed token payload
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Username the token was issued to
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// A freshly minted token together with its expiry instant
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("JWT signing secret must not be empty")]
    EmptySecret,

    #[error("token lifetime must be between 1 and {MAX_TOKEN_TTL_HOURS} hours")]
    InvalidTtl,

    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("invalid token")]
    InvalidToken,
}

// ============================================================================
// Key Storage
// ============================================================================

/// Process-wide signing material
///
/// Built once from `JWT_SECRET` and never rotated while the process runs.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys")
            .field("secret", &"[REDACTED]")
            .field("algorithm", &JWT_ALGORITHM)
            .field("ttl_hours", &self.ttl.num_hours())
            .finish()
    }
}

impl JwtKeys {
    /// Build keys from a symmetric secret and the token lifetime
    pub fn from_secret(secret: &[u8], ttl: Duration) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::EmptySecret);
        }
        if ttl <= Duration::zero() || ttl > Duration::hours(MAX_TOKEN_TTL_HOURS) {
            return Err(JwtError::InvalidTtl);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        })
    }

    /// Lifetime applied to every issued token
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // ========================================================================
    // Token Generation
    // ========================================================================

    /// Issue a token for `username` expiring one TTL from now
    pub fn issue_token(&self, username: &str) -> Result<IssuedToken, JwtError> {
        self.issue_token_at(username, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_token_at(
        &self,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or(JwtError::InvalidTtl)?;
        let iat = now.timestamp();
        let exp = expires_at.timestamp();

        let claims = Claims {
            username: username.to_string(),
            iat,
            exp,
        };

        let token = encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding)
            .map_err(|e| JwtError::Signing(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_at: expires_at.with_nanosecond(0).unwrap_or(expires_at),
        })
    }

    // ========================================================================
    // Token Validation
    // ========================================================================

    /// Validate a token against the current time
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_token_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`
    ///
    /// A token is valid iff its HS256 signature verifies and `now < exp`.
    /// There is no clock leeway.
    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        // Expiry is checked below against the caller-supplied clock.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            JwtError::InvalidToken
        })?;

        if now.timestamp() >= data.claims.exp {
            tracing::debug!(exp = data.claims.exp, "token expired");
            return Err(JwtError::InvalidToken);
        }

        Ok(data.claims)
    }
}

// ============================================================================
// Tests
// ============================================================================
