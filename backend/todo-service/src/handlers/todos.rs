/// To-do handlers
///
/// Everything except `list_todos` runs behind the token validation gateway and
/// receives the caller as [`AuthenticatedUser`].
use actix_middleware::AuthenticatedUser;
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
    db::todo_repo,
    error::{AppError, Result},
    models::{NewTodo, UpdateTodo},
    AppState,
};

const INVALID_PAYLOAD: &str = "invalid request payload";

fn parse_id(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok()
}

/// GET /todos (public)
pub async fn list_todos(state: web::Data<AppState>) -> Result<HttpResponse> {
    let todos = todo_repo::list_todos(&state.db).await?;
    Ok(HttpResponse::Ok().json(todos))
}

/// GET /todos/{id}
pub async fn get_todo(
    state: web::Data<AppState>,
    path: web::Path<String>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let not_found = || AppError::NotFound("Todo not found".to_string());

    let id = parse_id(&path).ok_or_else(not_found)?;
    let todo = todo_repo::find_todo(&state.db, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(todo))
}

/// POST /todos
pub async fn create_todo(
    state: web::Data<AppState>,
    payload: web::Json<NewTodo>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let todo = todo_repo::create_todo(&state.db, &payload.title, payload.completed, &user.username)
        .await?;
    tracing::info!(todo_id = todo.id, owner = %user.username, "todo created");

    Ok(HttpResponse::Ok().json(todo))
}

/// PUT /todos/{id}
///
/// The id is checked before the body is decoded.
pub async fn update_todo(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let id = parse_id(&path)
        .ok_or_else(|| AppError::UnprocessableEntity("id missing in url".to_string()))?;

    let update: UpdateTodo = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "rejected update body");
        AppError::BadRequest(INVALID_PAYLOAD.to_string())
    })?;

    let rows = todo_repo::update_todo(&state.db, id, &user.username, &update.title, update.completed)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, todo_id = id, "todo update failed");
            0
        });

    if rows == 0 {
        return Err(AppError::Internal(
            "failed to update todo or unauthorized".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "To-do update successful!" })))
}

/// DELETE /todos/{id}
///
/// Succeeds even when no row matched the id and owner.
pub async fn delete_todo(
    state: web::Data<AppState>,
    path: web::Path<String>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let id = parse_id(&path)
        .ok_or_else(|| AppError::UnprocessableEntity("id missing in url".to_string()))?;

    let rows = todo_repo::delete_todo(&state.db, id, &user.username).await?;
    tracing::debug!(todo_id = id, owner = %user.username, rows, "todo delete");

    Ok(HttpResponse::Ok().json(json!({ "result": "success" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("99999999999"), None);
    }
}
