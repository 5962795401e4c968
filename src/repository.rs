use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Todo, TodoChanges};

/// Column list shared by every statement so rows decode the same way
/// regardless of NULLs written by other clients.
const TODO_COLUMNS: &str = r#"
    id,
    title,
    COALESCE(description, '') AS description,
    COALESCE(completed, FALSE) AS completed,
    created_at::timestamptz AS created_at
"#;

/// Data access for the `todos` table. `Ok(None)` means no row matched.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Todo>, sqlx::Error>;
    async fn get(&self, id: i32) -> Result<Option<Todo>, sqlx::Error>;
    async fn create(&self, title: &str, description: &str) -> Result<Todo, sqlx::Error>;
    async fn update(&self, id: i32, changes: &TodoChanges) -> Result<Option<Todo>, sqlx::Error>;
    async fn delete(&self, id: i32) -> Result<Option<Todo>, sqlx::Error>;
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

#[derive(Clone)]
pub struct PgTodoRepository {
    db: PgPool,
}

impl PgTodoRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn list(&self) -> Result<Vec<Todo>, sqlx::Error> {
        let sql = format!("SELECT {TODO_COLUMNS} FROM todos ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Todo>(&sql).fetch_all(&self.db).await
    }

    async fn get(&self, id: i32) -> Result<Option<Todo>, sqlx::Error> {
        let sql = format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = $1");
        sqlx::query_as::<_, Todo>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
    }

    async fn create(&self, title: &str, description: &str) -> Result<Todo, sqlx::Error> {
        let sql = format!(
            "INSERT INTO todos (title, description) VALUES ($1, $2) RETURNING {TODO_COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&sql)
            .bind(title)
            .bind(description)
            .fetch_one(&self.db)
            .await
    }

    async fn update(&self, id: i32, changes: &TodoChanges) -> Result<Option<Todo>, sqlx::Error> {
        let sql = format!(
            "UPDATE todos SET title = $1, description = $2, completed = $3 WHERE id = $4 RETURNING {TODO_COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&sql)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(changes.completed)
            .bind(id)
            .fetch_optional(&self.db)
            .await
    }

    async fn delete(&self, id: i32) -> Result<Option<Todo>, sqlx::Error> {
        let sql = format!("DELETE FROM todos WHERE id = $1 RETURNING {TODO_COLUMNS}");
        sqlx::query_as::<_, Todo>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }
}
