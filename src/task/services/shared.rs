//! Lock-guarded handle to a task collection shared by a board and its
//! coordinator.

use crate::task::domain::TaskCollection;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared, exclusively-mutated task collection.
///
/// Guards must not be held across an `.await`. Every collection operation
/// either completes or leaves the list untouched, so a poisoned lock is
/// recovered rather than reported.
#[derive(Debug, Clone, Default)]
pub struct SharedTaskCollection(Arc<RwLock<TaskCollection>>);

impl SharedTaskCollection {
    /// Creates a handle to an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle to an existing collection.
    #[must_use]
    pub fn from_collection(collection: TaskCollection) -> Self {
        Self(Arc::new(RwLock::new(collection)))
    }

    /// Locks the collection for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, TaskCollection> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the collection for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, TaskCollection> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
}
