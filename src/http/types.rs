use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::domain::{error::RepositoryError, todo::TodoId};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("todo {0} not found")]
    NotFound(TodoId),

    #[error("todo {0} already exists")]
    Conflict(TodoId),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Duplicate(id) => ApiError::Conflict(id),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found", Some(self.to_string())),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "Conflict", Some(self.to_string())),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None)
            }
        };
        (status, axum::Json(ErrorBody { error: error.to_string(), details })).into_response()
    }
}
