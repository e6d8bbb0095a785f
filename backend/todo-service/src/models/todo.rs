/// To-do item model
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Outward view of a row in `todos`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_defaults_to_false() {
        let todo: NewTodo = serde_json::from_str(r#"{"title":"buy milk"}"#).unwrap();
        assert_eq!(todo.title, "buy milk");
        assert!(!todo.completed);
    }

    #[test]
    fn test_title_required() {
        assert!(serde_json::from_str::<UpdateTodo>(r#"{"completed":true}"#).is_err());
    }
}
