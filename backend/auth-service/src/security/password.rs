/// Password hashing and verification using Argon2id
use crate::error::{AuthError, AuthResult};
use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};

/// Well-formed Argon2id hash (default parameters) that matches no password
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$3aek//BhEfRXzgwuH5BxRg$ymhUYxnpW3Vpe0p/GPcsopN4FAvRA8ttec+whD0H4h4";

/// Hash a password using Argon2id
/// Returns the PHC string suitable for storage in database
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(rand::thread_rng());
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::Internal("Failed to hash password".to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> AuthResult<()> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AuthError::Internal("Invalid password hash format".to_string()))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// Run one full verification against a hash that never matches
///
/// Used when the username is unknown so that login takes as long as a
/// wrong-password attempt.
pub fn verify_dummy(password: &str) {
    if let Err(AuthError::Internal(msg)) = verify_password(password, DUMMY_HASH) {
        tracing::error!(error = %msg, "dummy password hash rejected");
    }
}
