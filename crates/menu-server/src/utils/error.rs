use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use menu_core::MenuError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl From<MenuError> for ApiError {
    fn from(err: MenuError) -> Self {
        let message = err.to_string();
        match err {
            MenuError::PathNotFound(_)
            | MenuError::TargetNotFound(_)
            | MenuError::ImageNotFound(_) => ApiError::NotFound(message),
            MenuError::CrossContainerMove { .. }
            | MenuError::IndexOutOfRange { .. }
            | MenuError::InvalidImageReference(_)
            | MenuError::ValidationError(_) => ApiError::BadRequest(message),
            MenuError::PersistenceFailure(_) => ApiError::StorageError(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NotFound", msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BadRequest", msg)
            }
            ApiError::StorageError(msg) => {
                tracing::error!("Storage error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "StorageError", msg)
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
