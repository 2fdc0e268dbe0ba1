use chrono::Local;

pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Data model representing a Todo item
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, serde::Serialize, serde::Deserialize)]
pub struct Todo {
    pub id: i64,
    pub text: String,
    pub completed: bool,
    pub created_at: String,
}

/// Creation timestamp in the format stored alongside each todo.
pub fn created_at_now() -> String {
    Local::now().format(CREATED_AT_FORMAT).to_string()
}
