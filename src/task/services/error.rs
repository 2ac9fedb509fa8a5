//! Errors reported by task board operations.

use crate::task::{
    domain::{CollectionError, DataShapeError, TaskId, TaskValidationError},
    ports::RemoteError,
};
use thiserror::Error;

/// Errors surfaced to the caller of a task board operation.
///
/// None of these is fatal: after any of them the board keeps its previous
/// local state and stays usable.
#[derive(Debug, Clone, Error)]
pub enum TaskBoardError {
    /// The draft or patch was rejected before any request was sent.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),

    /// The persistence collaborator failed the request.
    #[error("mutation failed: {0}")]
    Remote(#[from] RemoteError),

    /// The targeted task is not in the local collection.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The persistence collaborator returned malformed task data.
    #[error(transparent)]
    DataShape(#[from] DataShapeError),

    /// The board cannot be activated without a signed-in user.
    #[error("no user is signed in")]
    NoCurrentUser,
}

impl From<CollectionError> for TaskBoardError {
    fn from(err: CollectionError) -> Self {
        match err {
            CollectionError::NotFound(id) => Self::NotFound(id),
            CollectionError::DataShape(shape) => Self::DataShape(shape),
        }
    }
}

/// Result type for task board operations.
pub type TaskBoardResult<T> = Result<T, TaskBoardError>;
