//! Domain errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MenuError {
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Target not found: {0}")]
    TargetNotFound(String),

    #[error("Cannot move {dragged} onto {target}: nodes do not share a parent")]
    CrossContainerMove { dragged: String, target: String },

    #[error("Index {index} out of range for list of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid image reference: {0}")]
    InvalidImageReference(String),

    #[error("Image not found: {0}")]
    ImageNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),
}

impl From<validator::ValidationErrors> for MenuError {
    fn from(err: validator::ValidationErrors) -> Self {
        MenuError::ValidationError(err.to_string())
    }
}

impl From<serde_json::Error> for MenuError {
    fn from(err: serde_json::Error) -> Self {
        MenuError::PersistenceFailure(err.to_string())
    }
}

impl From<std::io::Error> for MenuError {
    fn from(err: std::io::Error) -> Self {
        MenuError::PersistenceFailure(err.to_string())
    }
}
