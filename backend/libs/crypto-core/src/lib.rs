//! Shared token primitives for the auth and todo services.
//!
//! ## Modules
//! - `jwt`: HS256 token issuance and validation bound to a username

pub mod jwt;

pub use jwt::{
    Claims, IssuedToken, JwtError, JwtKeys, DEFAULT_TOKEN_TTL_HOURS, MAX_TOKEN_TTL_HOURS,
};
