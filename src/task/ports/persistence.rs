//! Persistence port: the hosted backend that owns the durable task rows.

use crate::task::domain::{NewTaskRow, OwnerId, TaskId, TaskRow, TaskRowPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for persistence collaborator calls.
pub type PersistenceResult<T> = Result<T, RemoteError>;

/// Task persistence contract.
///
/// Every call is one request/response round trip. Implementations do not
/// retry.
#[async_trait]
pub trait TaskPersistence: Send + Sync {
    /// Returns every row owned by `owner`, in any order.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the backend cannot be queried.
    async fn list_by_owner(&self, owner: OwnerId) -> PersistenceResult<Vec<TaskRow>>;

    /// Inserts a new row and returns it with the server-assigned identifier
    /// and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the backend rejects the insert.
    async fn insert_record(&self, row: NewTaskRow) -> PersistenceResult<TaskRow>;

    /// Applies `patch` to the row with identifier `id`.
    ///
    /// Returns the updated row when the backend sends a representation back,
    /// or `None` when it only confirms the write.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the backend rejects the update, including
    /// when the row does not exist.
    async fn update_record(
        &self,
        id: TaskId,
        patch: TaskRowPatch,
    ) -> PersistenceResult<Option<TaskRow>>;

    /// Deletes the row with identifier `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the backend rejects the delete.
    async fn delete_record(&self, id: TaskId) -> PersistenceResult<()>;
}

/// Errors returned by persistence collaborators.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// The backend answered with an error message.
    #[error("remote request rejected: {0}")]
    Rejected(String),

    /// Transport or driver failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RemoteError {
    /// Creates a rejection carrying the backend's message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Wraps a transport or driver error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
