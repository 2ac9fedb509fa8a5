//! Task board: one signed-in user's task list session.

use super::{MutationCoordinator, SharedTaskCollection, TaskBoardError, TaskBoardResult};
use crate::task::{
    domain::{
        OwnerId, PriorityFilter, StatusFilter, TaskDraft, TaskFilter, TaskId, TaskPatch,
        TaskRecord, TaskStats,
    },
    ports::{IdentityProvider, TaskPersistence},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::debug;

/// View model for a task list screen.
///
/// A board exists only while a user is signed in: it is created by
/// [`TaskBoard::activate`] and discarded by [`TaskBoard::deactivate`]. It
/// owns the task collection, the search/filter state, and the coordinator
/// that changes the collection.
pub struct TaskBoard<P, C>
where
    P: TaskPersistence,
    C: Clock + Send + Sync,
{
    persistence: Arc<P>,
    clock: Arc<C>,
    owner: OwnerId,
    collection: SharedTaskCollection,
    coordinator: MutationCoordinator<P, C>,
    filter: TaskFilter,
}

impl<P, C> TaskBoard<P, C>
where
    P: TaskPersistence,
    C: Clock + Send + Sync,
{
    /// Opens a board for the user `identity` reports as signed in.
    ///
    /// The collection starts empty; call [`TaskBoard::refresh`] to load it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NoCurrentUser`] when nobody is signed in.
    pub fn activate(
        persistence: Arc<P>,
        identity: &impl IdentityProvider,
        clock: Arc<C>,
    ) -> TaskBoardResult<Self> {
        let owner = identity
            .current_user()
            .ok_or(TaskBoardError::NoCurrentUser)?;
        let collection = SharedTaskCollection::new();
        let coordinator = MutationCoordinator::new(
            Arc::clone(&persistence),
            Arc::clone(&clock),
            collection.clone(),
            owner,
        );
        debug!(%owner, "task board activated");
        Ok(Self {
            persistence,
            clock,
            owner,
            collection,
            coordinator,
            filter: TaskFilter::new(),
        })
    }

    /// Closes the board, dropping its local state.
    pub fn deactivate(self) {
        debug!(owner = %self.owner, "task board deactivated");
    }

    /// Reloads every task the owner has and returns how many arrived.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Remote`] when the fetch fails and
    /// [`TaskBoardError::DataShape`] when any row is malformed; the
    /// collection is unchanged in both cases.
    pub async fn refresh(&self) -> TaskBoardResult<usize> {
        let rows = self.persistence.list_by_owner(self.owner).await?;
        let count = {
            let mut collection = self.collection.write();
            collection.replace_all(rows)?;
            collection.len()
        };
        debug!(owner = %self.owner, count, "task board refreshed");
        Ok(count)
    }

    /// Returns the signed-in owner.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Returns the coordinator applying this board's mutations.
    #[must_use]
    pub const fn coordinator(&self) -> &MutationCoordinator<P, C> {
        &self.coordinator
    }

    /// Creates a task. See [`MutationCoordinator::create`].
    ///
    /// # Errors
    ///
    /// Propagates the coordinator's errors.
    pub async fn create(&self, draft: TaskDraft) -> TaskBoardResult<TaskRecord> {
        self.coordinator.create(draft).await
    }

    /// Edits a task. See [`MutationCoordinator::update`].
    ///
    /// # Errors
    ///
    /// Propagates the coordinator's errors.
    pub async fn update(&self, id: &TaskId, patch: TaskPatch) -> TaskBoardResult<TaskRecord> {
        self.coordinator.update(id, patch).await
    }

    /// Toggles completion. See [`MutationCoordinator::toggle_complete`].
    ///
    /// # Errors
    ///
    /// Propagates the coordinator's errors.
    pub async fn toggle_complete(&self, id: &TaskId) -> TaskBoardResult<TaskRecord> {
        self.coordinator.toggle_complete(id).await
    }

    /// Deletes a task. See [`MutationCoordinator::delete`].
    ///
    /// # Errors
    ///
    /// Propagates the coordinator's errors.
    pub async fn delete(&self, id: &TaskId) -> TaskBoardResult<TaskRecord> {
        self.coordinator.delete(id).await
    }

    /// Returns every task, newest first.
    #[must_use]
    pub fn tasks(&self) -> Vec<TaskRecord> {
        self.collection.read().iter().cloned().collect()
    }

    /// Returns the tasks passing the current filter, newest first.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<TaskRecord> {
        self.collection
            .read()
            .filtered(&self.filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Returns the task with the given identifier.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<TaskRecord> {
        self.collection.read().get(id).cloned()
    }

    /// Returns counts over every task as of now.
    #[must_use]
    pub fn stats(&self) -> TaskStats {
        self.collection.read().stats(self.clock.utc())
    }

    /// Returns the current search/filter state.
    #[must_use]
    pub const fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Sets the free-text search query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.set_query(query);
    }

    /// Sets the priority filter.
    pub const fn set_priority_filter(&mut self, priority: PriorityFilter) {
        self.filter.set_priority(priority);
    }

    /// Sets the status filter.
    pub const fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.set_status(status);
    }

    /// Clears the query and both filters.
    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }
}
