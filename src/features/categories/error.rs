//! Domain errors raised by the category lifecycle.
//!
//! None of these are retried; the HTTP layer maps each kind to a status code
//! through `From<CategoryError> for AppError`.

use thiserror::Error;

use crate::core::error::AppError;
use crate::features::categories::repositories::RepositoryError;

#[derive(Debug, Error)]
pub enum CategoryError {
    /// Malformed or missing caller input
    #[error("{0}")]
    InvalidData(String),

    /// Category does not exist or is logically invisible
    #[error("{0}")]
    NotFound(String),

    /// Name already used by a non-deleted category
    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    AlreadyActive(String),

    #[error("{0}")]
    AlreadyInactive(String),

    /// Status change out of the terminal DELETED state
    #[error("{0}")]
    InvalidTransition(String),

    #[error("Category storage is unavailable")]
    Storage(#[source] RepositoryError),
}

pub type Result<T> = std::result::Result<T, CategoryError>;

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::InvalidData(msg) => AppError::UnprocessableEntity(msg),
            CategoryError::NotFound(msg) => AppError::NotFound(msg),
            CategoryError::AlreadyExists(msg) => AppError::Conflict(msg),
            CategoryError::AlreadyActive(msg) | CategoryError::AlreadyInactive(msg) => {
                AppError::BadRequest(msg)
            }
            CategoryError::InvalidTransition(msg) => AppError::Conflict(msg),
            CategoryError::Storage(source) => {
                tracing::error!("Category storage failure: {:?}", source);
                AppError::Internal("Category storage failure".to_string())
            }
        }
    }
}
