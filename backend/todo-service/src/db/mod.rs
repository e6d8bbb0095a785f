/// Database access for the todo service
pub mod todo_repo;

use sqlx::PgPool;
use tracing::info;

/// Create the `todos` table, or add the owner column to an older one
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Ensuring todos table exists");

    sqlx::query(TODOS_TABLE).execute(pool).await?;
    sqlx::query(TODOS_OWNER_COLUMN).execute(pool).await?;

    Ok(())
}

const TODOS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id SERIAL PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    description TEXT,
    completed BOOLEAN NOT NULL DEFAULT FALSE,
    owner_username VARCHAR(255)
)
"#;

const TODOS_OWNER_COLUMN: &str =
    "ALTER TABLE todos ADD COLUMN IF NOT EXISTS owner_username VARCHAR(255)";
