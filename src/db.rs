use std::path::Path;

use sqlx::{
    migrate::MigrateDatabase,
    query, query_as,
    sqlite::{Sqlite, SqlitePoolOptions},
    Pool,
};
use tracing::{debug, info};

use crate::{
    error::StoreError,
    model::{created_at_now, Todo},
};

const SCHEMA: &str = r#"CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text TEXT NOT NULL,
    completed BOOLEAN NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);"#;

const MAX_CONNECTIONS: u32 = 10;

/// Makes sure the directory holding the database file exists and is usable.
pub async fn prepare_data_dir(dir: &Path) -> Result<(), StoreError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| StoreError::DataDir {
            path: dir.display().to_string(),
            source,
        })
}

/// SQLite-backed todo storage shared by every request handler.
#[derive(Debug, Clone)]
pub struct TodoStore {
    db: Pool<Sqlite>,
}

/// In-memory SQLite databases only live while a connection to them is open.
fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

fn pool_options(url: &str) -> SqlitePoolOptions {
    if is_in_memory(url) {
        // one pinned connection so the database is never dropped while idle
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    }
}

impl TodoStore {
    /// Opens the database at `url`, creating the file and the schema when missing.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        // Check if the database exists, if not, create it
        if !is_in_memory(url) && !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!(url, "creating database");
            Sqlite::create_database(url).await?;
        } else {
            debug!(url, "database already exists");
        }

        let store = Self::open(url).await?;
        info!(url, "connection to the database is successful");
        Ok(store)
    }

    /// A private in-memory database, gone once the store is closed.
    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::open("sqlite::memory:").await
    }

    async fn open(url: &str) -> Result<Self, StoreError> {
        let db = pool_options(url).connect(url).await?;
        query(SCHEMA).execute(&db).await?;
        Ok(Self { db })
    }

    pub async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let todos = query_as::<_, Todo>(
            "SELECT id, text, completed, created_at FROM todos ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;
        Ok(todos)
    }

    pub async fn get(&self, id: i64) -> Result<Todo, StoreError> {
        query_as::<_, Todo>("SELECT id, text, completed, created_at FROM todos WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn create(&self, text: &str) -> Result<Todo, StoreError> {
        let todo = query_as::<_, Todo>(
            "INSERT INTO todos (text, completed, created_at) VALUES (?, 0, ?) \
             RETURNING id, text, completed, created_at",
        )
        .bind(text)
        .bind(created_at_now())
        .fetch_one(&self.db)
        .await?;
        Ok(todo)
    }

    /// Applies whichever fields are present and returns the updated row.
    pub async fn update(
        &self,
        id: i64,
        text: Option<&str>,
        completed: Option<bool>,
    ) -> Result<Todo, StoreError> {
        query_as::<_, Todo>(
            "UPDATE todos SET text = COALESCE(?, text), completed = COALESCE(?, completed) \
             WHERE id = ? RETURNING id, text, completed, created_at",
        )
        .bind(text)
        .bind(completed)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(StoreError::NotFound(id))
    }

    /// Marks a todo done. Returns `false` when no todo has that id.
    pub async fn complete(&self, id: i64) -> Result<bool, StoreError> {
        let rows_affected = query("UPDATE todos SET completed = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?
            .rows_affected();
        Ok(rows_affected > 0)
    }

    /// Removes a todo. Returns `false` when no todo has that id.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let rows_affected = query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?
            .rows_affected();
        Ok(rows_affected > 0)
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.db.close().await;
    }
}
