/// Integration tests for crypto-core JWT functionality
///
/// This test module covers:
/// - Expiry boundary behavior
/// - Tamper detection on every byte of the token
/// - Algorithm pinning
/// - Claims that are missing or malformed
use chrono::{Duration, TimeZone, Utc};
use crypto_core::jwt::{Claims, JwtError, JwtKeys, DEFAULT_TOKEN_TTL_HOURS};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

const TEST_SECRET: &[u8] = b"integration-test-secret";

fn keys() -> JwtKeys {
    JwtKeys::from_secret(TEST_SECRET, Duration::hours(DEFAULT_TOKEN_TTL_HOURS))
        .expect("build keys")
}

#[test]
fn test_token_valid_just_after_issue() {
    let keys = keys();
    let issued_at = Utc.with_ymd_and_hms(2024, 1, 10, 8, 30, 0).unwrap();
    let issued = keys.issue_token_at("bob", issued_at).unwrap();

    let claims = keys
        .validate_token_at(&issued.token, issued_at + Duration::seconds(1))
        .expect("token should be valid one second after issue");
    assert_eq!(claims.username, "bob");
}

#[test]
fn test_token_valid_one_second_before_expiry() {
    let keys = keys();
    let issued_at = Utc.with_ymd_and_hms(2024, 1, 10, 8, 30, 0).unwrap();
    let issued = keys.issue_token_at("bob", issued_at).unwrap();

    let at = issued_at + Duration::days(5) - Duration::seconds(1);
    assert!(keys.validate_token_at(&issued.token, at).is_ok());
}

#[test]
fn test_token_invalid_at_expiry_instant() {
    let keys = keys();
    let issued_at = Utc.with_ymd_and_hms(2024, 1, 10, 8, 30, 0).unwrap();
    let issued = keys.issue_token_at("bob", issued_at).unwrap();

    let at = issued_at + Duration::days(5);
    assert_eq!(
        keys.validate_token_at(&issued.token, at).unwrap_err(),
        JwtError::InvalidToken
    );
}

#[test]
fn test_token_invalid_one_second_after_expiry() {
    let keys = keys();
    let issued_at = Utc.with_ymd_and_hms(2024, 1, 10, 8, 30, 0).unwrap();
    let issued = keys.issue_token_at("bob", issued_at).unwrap();

    let at = issued_at + Duration::days(5) + Duration::seconds(1);
    assert_eq!(
        keys.validate_token_at(&issued.token, at).unwrap_err(),
        JwtError::InvalidToken
    );
}

#[test]
fn test_token_issued_in_past_is_expired_now() {
    let keys = keys();
    let issued = keys
        .issue_token_at("bob", Utc::now() - Duration::days(6))
        .unwrap();

    assert!(keys.validate_token(&issued.token).is_err());
}

#[test]
fn test_mutating_any_byte_invalidates_token() {
    let keys = keys();
    let now = Utc::now();
    let issued = keys.issue_token_at("carol", now).unwrap();
    let original = issued.token.as_bytes();

    for i in 0..original.len() {
        let mut mutated = original.to_vec();
        mutated[i] = if mutated[i] == b'A' { b'B' } else { b'A' };
        let mutated = String::from_utf8(mutated).unwrap();

        assert!(
            keys.validate_token_at(&mutated, now).is_err(),
            "mutation at byte {} was accepted",
            i
        );
    }
}

#[test]
fn test_other_algorithm_with_same_secret_rejected() {
    let keys = keys();
    let now = Utc::now();
    let claims = Claims {
        username: "mallory".to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(1)).timestamp(),
    };

    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .unwrap();

    assert_eq!(
        keys.validate_token(&token).unwrap_err(),
        JwtError::InvalidToken
    );
}

#[test]
fn test_token_without_expiry_rejected() {
    let keys = keys();
    let payload = serde_json::json!({ "username": "mallory", "iat": Utc::now().timestamp() });

    let token = encode(
        &Header::new(Algorithm::HS256),
        &payload,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .unwrap();

    assert!(keys.validate_token(&token).is_err());
}

#[test]
fn test_token_without_username_rejected() {
    let keys = keys();
    let now = Utc::now();
    let payload = serde_json::json!({
        "iat": now.timestamp(),
        "exp": (now + Duration::hours(1)).timestamp(),
    });

    let token = encode(
        &Header::new(Algorithm::HS256),
        &payload,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .unwrap();

    assert!(keys.validate_token(&token).is_err());
}

#[test]
fn test_custom_ttl_respected() {
    let keys = JwtKeys::from_secret(TEST_SECRET, Duration::minutes(15)).unwrap();
    let issued_at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let issued = keys.issue_token_at("dave", issued_at).unwrap();

    assert_eq!(issued.expires_at, issued_at + Duration::minutes(15));
    assert!(keys
        .validate_token_at(&issued.token, issued_at + Duration::minutes(14))
        .is_ok());
    assert!(keys
        .validate_token_at(&issued.token, issued_at + Duration::minutes(15))
        .is_err());
}
