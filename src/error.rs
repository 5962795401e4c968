use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

pub const TODO_NOT_FOUND: &str = "Todo not found";
pub const TITLE_REQUIRED: &str = "Title is required";
pub const INVALID_ID: &str = "Invalid todo id";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Todo not found")]
    NotFound,

    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Driver message of a storage failure, attached to the opaque 500 response
/// so a response layer can surface it when configured to.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Database(e) => {
                error!("database error: {}", e);
                let body = Json(ErrorResponse {
                    error: "Internal server error".to_string(),
                });
                let mut response = (status, body).into_response();
                response.extensions_mut().insert(ErrorDetail(e.to_string()));
                response
            }
            other => (
                status,
                Json(ErrorResponse {
                    error: other.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(_: PathRejection) -> Self {
        AppError::Validation(INVALID_ID.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            AppError::Validation(TITLE_REQUIRED.to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Database(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_message_is_fixed() {
        assert_eq!(AppError::NotFound.to_string(), TODO_NOT_FOUND);
    }

    #[test]
    fn database_error_keeps_driver_message() {
        let err = AppError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.to_string(), sqlx::Error::PoolTimedOut.to_string());
    }

    #[tokio::test]
    async fn database_error_response_is_opaque_with_detail_attached() {
        let response = AppError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let detail = response.extensions().get::<ErrorDetail>().cloned();
        assert_eq!(
            detail.map(|d| d.0),
            Some(sqlx::Error::PoolTimedOut.to_string())
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Internal server error"}));
    }
}
