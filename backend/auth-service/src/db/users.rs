/// User database operations
use crate::error::{AuthError, AuthResult};
use crate::models::User;
use sqlx::PgPool;

/// Insert a user and return the stored row
///
/// A duplicate username surfaces as [`AuthError::UsernameTaken`].
pub async fn create_user(pool: &PgPool, username: &str, password_hash: &str) -> AuthResult<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password_hash)
        VALUES ($1, $2)
        RETURNING id, username, password_hash
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AuthError::UsernameTaken,
        other => AuthError::Database(other.to_string()),
    })
}

/// Find user by username
pub async fn find_by_username(pool: &PgPool, username: &str) -> AuthResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Look up only the numeric id for a username
pub async fn find_id_by_username(pool: &PgPool, username: &str) -> AuthResult<Option<i32>> {
    let id = sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(id)
}
