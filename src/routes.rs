use axum::extract::State;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodRouter, get};
use axum::{Json, Router, http::StatusCode};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::error::{AppError, ErrorDetail, ErrorResponse, TITLE_REQUIRED};
use crate::extract::{JsonBody, TodoId};
use crate::models::{NewTodoRequest, Todo, TodoChanges, UpdateTodoRequest};
use crate::state::AppState;

pub const LIVENESS_MESSAGE: &str = "Todo API is running";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/todos", todo_collection())
        .route("/api/todos/", todo_collection())
        .route(
            "/api/todos/{id}",
            get(get_todo)
                .put(update_todo)
                .patch(update_todo)
                .delete(delete_todo),
        )
        .layer(middleware::map_response_with_state(
            state.clone(),
            error_details,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn todo_collection() -> MethodRouter<AppState> {
    get(list_todos).post(create_todo)
}

/// Swaps the opaque 500 body for the driver message when the operator opted in.
async fn error_details(State(state): State<AppState>, mut response: Response) -> Response {
    let Some(ErrorDetail(message)) = response.extensions_mut().remove::<ErrorDetail>() else {
        return response;
    };
    if !state.expose_error_details {
        return response;
    }
    (response.status(), Json(ErrorResponse { error: message })).into_response()
}

async fn root() -> &'static str {
    LIVENESS_MESSAGE
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.todos.ping().await?;
    Ok(StatusCode::OK)
}

async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = state.todos.list().await?;
    Ok(Json(todos))
}

async fn get_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<Json<Todo>, AppError> {
    let todo = state.todos.get(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(todo))
}

async fn create_todo(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<NewTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let title = required_title(req.title)?;
    let description = req.description.unwrap_or_default();
    let todo = state.todos.create(&title, &description).await?;
    debug!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Replaces every mutable field; omitted fields fall back to their defaults.
async fn update_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
    JsonBody(req): JsonBody<UpdateTodoRequest>,
) -> Result<Json<Todo>, AppError> {
    let changes = TodoChanges {
        title: required_title(req.title)?,
        description: req.description.unwrap_or_default(),
        completed: req.completed.unwrap_or(false),
    };
    let todo = state
        .todos
        .update(id, &changes)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(todo))
}

async fn delete_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<Json<Todo>, AppError> {
    let todo = state.todos.delete(id).await?.ok_or(AppError::NotFound)?;
    debug!(id = todo.id, "todo deleted");
    Ok(Json(todo))
}

fn required_title(title: Option<String>) -> Result<String, AppError> {
    match title {
        Some(title) if !title.is_empty() => Ok(title),
        _ => Err(AppError::Validation(TITLE_REQUIRED.to_string())),
    }
}
