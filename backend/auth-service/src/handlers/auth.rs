/// Authentication handlers
use actix_web::{web, HttpResponse};

use crate::{
    db::users,
    error::{AuthError, AuthResult},
    models::{
        LoginRequest, LoginResponse, RegisterRequest, UserIdRequest, UserIdResponse,
        UserResponse, ValidateRequest, ValidateResponse,
    },
    security::password,
    AppState,
};

/// Register endpoint handler
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> AuthResult<HttpResponse> {
    let RegisterRequest { username, password } = payload.into_inner();
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::BadRequest("Invalid input".to_string()));
    }

    let password_hash = web::block(move || password::hash_password(&password)).await??;

    let user = users::create_user(&state.db, &username, &password_hash).await?;
    tracing::info!(user_id = user.id, username = %user.username, "user registered");

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Login endpoint handler
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> AuthResult<HttpResponse> {
    let LoginRequest { username, password } = payload.into_inner();

    let Some(user) = users::find_by_username(&state.db, &username).await? else {
        tracing::debug!(username = %username, "login for unknown user");
        web::block(move || password::verify_dummy(&password)).await?;
        return Err(AuthError::InvalidCredentials);
    };

    let stored_hash = user.password_hash;
    web::block(move || password::verify_password(&password, &stored_hash)).await??;

    let issued = state.jwt.issue_token(&user.username)?;
    tracing::info!(username = %user.username, expires_at = %issued.expires_at, "token issued");

    Ok(HttpResponse::Ok().json(LoginResponse {
        token: issued.token,
        expiring_at: issued.expires_at,
    }))
}

/// Token validation endpoint handler
///
/// Called by resource services for every protected request.
pub async fn validate(
    state: web::Data<AppState>,
    payload: web::Json<ValidateRequest>,
) -> AuthResult<HttpResponse> {
    let claims = state.jwt.validate_token(&payload.token)?;

    Ok(HttpResponse::Ok().json(ValidateResponse {
        valid: true,
        username: claims.username,
    }))
}

/// Resolve a username to its numeric id
pub async fn user_id(
    state: web::Data<AppState>,
    payload: web::Json<UserIdRequest>,
) -> AuthResult<HttpResponse> {
    let id = users::find_id_by_username(&state.db, &payload.username)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    Ok(HttpResponse::Ok().json(UserIdResponse { user_id: id }))
}
