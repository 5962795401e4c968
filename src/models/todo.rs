use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/todos`.
///
/// Fields are optional at the wire level so a missing title is reported
/// as a validation error instead of a JSON rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Body of `PUT`/`PATCH /api/todos/{id}`. Every field is rewritten.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// A validated, fully-specified replacement for the mutable fields of a todo.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoChanges {
    pub title: String,
    pub description: String,
    pub completed: bool,
}
