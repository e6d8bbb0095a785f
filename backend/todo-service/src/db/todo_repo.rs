/// To-do database operations
///
/// Update and delete are scoped to the owning username.
use crate::models::Todo;
use sqlx::PgPool;

pub async fn list_todos(pool: &PgPool) -> Result<Vec<Todo>, sqlx::Error> {
    sqlx::query_as::<_, Todo>("SELECT id, title, completed FROM todos ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn find_todo(pool: &PgPool, id: i32) -> Result<Option<Todo>, sqlx::Error> {
    sqlx::query_as::<_, Todo>("SELECT id, title, completed FROM todos WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create_todo(
    pool: &PgPool,
    title: &str,
    completed: bool,
    owner_username: &str,
) -> Result<Todo, sqlx::Error> {
    sqlx::query_as::<_, Todo>(
        r#"
        INSERT INTO todos (title, completed, owner_username)
        VALUES ($1, $2, $3)
        RETURNING id, title, completed
        "#,
    )
    .bind(title)
    .bind(completed)
    .bind(owner_username)
    .fetch_one(pool)
    .await
}

/// Returns the number of rows changed; zero when the id is unknown or owned by someone else
pub async fn update_todo(
    pool: &PgPool,
    id: i32,
    owner_username: &str,
    title: &str,
    completed: bool,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE todos
        SET title = $1, completed = $2
        WHERE id = $3 AND owner_username = $4
        "#,
    )
    .bind(title)
    .bind(completed)
    .bind(id)
    .bind(owner_username)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn delete_todo(pool: &PgPool, id: i32, owner_username: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND owner_username = $2")
        .bind(id)
        .bind(owner_username)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
