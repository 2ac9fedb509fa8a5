//! Mutation coordinator: submits task changes and applies confirmed results.

use super::{
    SharedTaskCollection, TaskBoardError, TaskBoardResult,
    mutation::{Mutation, MutationKind, MutationTracker},
};
use crate::task::{
    domain::{
        CollectionError, OwnerId, StatusChange, TaskDraft, TaskId, TaskPatch, TaskRecord,
        TaskRowPatch,
    },
    ports::TaskPersistence,
};
use mockable::Clock;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs create, update, toggle-complete, and delete requests against the
/// persistence collaborator.
///
/// Local state changes only after the collaborator confirms a request; a
/// failed request leaves the collection exactly as it was. Requests are not
/// serialized, retried, or cancelled.
pub struct MutationCoordinator<P, C>
where
    P: TaskPersistence,
    C: Clock + Send + Sync,
{
    persistence: Arc<P>,
    clock: Arc<C>,
    collection: SharedTaskCollection,
    owner: OwnerId,
    tracker: Arc<MutationTracker>,
}

impl<P, C> Clone for MutationCoordinator<P, C>
where
    P: TaskPersistence,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            persistence: Arc::clone(&self.persistence),
            clock: Arc::clone(&self.clock),
            collection: self.collection.clone(),
            owner: self.owner,
            tracker: Arc::clone(&self.tracker),
        }
    }
}

impl<P, C> MutationCoordinator<P, C>
where
    P: TaskPersistence,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator acting for `owner` on `collection`.
    #[must_use]
    pub fn new(
        persistence: Arc<P>,
        clock: Arc<C>,
        collection: SharedTaskCollection,
        owner: OwnerId,
    ) -> Self {
        Self {
            persistence,
            clock,
            collection,
            owner,
            tracker: Arc::new(MutationTracker::default()),
        }
    }

    /// Returns the number of requests awaiting a response.
    #[must_use]
    pub fn pending_mutations(&self) -> usize {
        self.tracker.in_flight()
    }

    /// Returns the most recently resolved request.
    #[must_use]
    pub fn last_mutation(&self) -> Option<Mutation> {
        self.tracker.last_resolved()
    }

    /// Creates a task from `draft`.
    ///
    /// The task is submitted with status `todo` and stamped with the
    /// coordinator's owner; the confirmed row is inserted at the head of the
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Validation`] before any request for an
    /// invalid draft, [`TaskBoardError::Remote`] when the collaborator fails,
    /// and [`TaskBoardError::DataShape`] when it returns a malformed row.
    pub async fn create(&self, draft: TaskDraft) -> TaskBoardResult<TaskRecord> {
        let row = draft.into_new_row(self.owner)?;
        self.run(MutationKind::Create, None, async {
            let stored = self.persistence.insert_record(row).await?;
            let record = TaskRecord::try_from(stored)?;
            self.collection.write().insert(record.clone());
            Ok(record)
        })
        .await
    }

    /// Applies `patch` to the task `id`.
    ///
    /// A status change in the patch also sets or clears the completion
    /// timestamp. An empty patch returns the current record without a
    /// request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Validation`] for an invalid patch and
    /// [`TaskBoardError::NotFound`] for an unknown task, both before any
    /// request; [`TaskBoardError::Remote`] or [`TaskBoardError::DataShape`]
    /// when the request fails.
    pub async fn update(&self, id: &TaskId, patch: TaskPatch) -> TaskBoardResult<TaskRecord> {
        let validated = patch.validate()?;
        let current = self.current(id)?;
        let status_change = validated
            .status()
            .map(|target| StatusChange::resolve(&current, target, self.clock.utc()));
        let row_patch = validated.into_row_patch(status_change);
        if row_patch.is_empty() {
            return Ok(current);
        }
        self.submit_patch(MutationKind::Update, id, row_patch).await
    }

    /// Flips the task `id` between completed and todo.
    ///
    /// Completing stamps the completion time; reopening clears it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] before any request for an
    /// unknown task; [`TaskBoardError::Remote`] or
    /// [`TaskBoardError::DataShape`] when the request fails.
    pub async fn toggle_complete(&self, id: &TaskId) -> TaskBoardResult<TaskRecord> {
        let current = self.current(id)?;
        let change = StatusChange::toggle(&current, self.clock.utc());
        self.submit_patch(
            MutationKind::ToggleComplete,
            id,
            TaskRowPatch::status_only(change),
        )
        .await
    }

    /// Deletes the task `id` and returns the removed record.
    ///
    /// A confirmed delete succeeds even when another request already removed
    /// the task locally; the record known before the request is returned.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] before any request for an
    /// unknown task and [`TaskBoardError::Remote`] when the collaborator
    /// fails.
    pub async fn delete(&self, id: &TaskId) -> TaskBoardResult<TaskRecord> {
        let current = self.current(id)?;
        self.run(MutationKind::Delete, Some(id), async {
            self.persistence.delete_record(id.clone()).await?;
            match self.collection.write().remove(id) {
                Ok(removed) => Ok(removed),
                Err(CollectionError::NotFound(_)) => Ok(current),
                Err(err) => Err(err.into()),
            }
        })
        .await
    }

    fn current(&self, id: &TaskId) -> TaskBoardResult<TaskRecord> {
        self.collection
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| TaskBoardError::NotFound(id.clone()))
    }

    async fn submit_patch(
        &self,
        kind: MutationKind,
        id: &TaskId,
        patch: TaskRowPatch,
    ) -> TaskBoardResult<TaskRecord> {
        self.run(kind, Some(id), async {
            let confirmed = self
                .persistence
                .update_record(id.clone(), patch.clone())
                .await?
                .map(TaskRecord::try_from)
                .transpose()?;
            // Merge into the record held now, not the one read before the request.
            let mut collection = self.collection.write();
            let record = match confirmed {
                Some(record) => record,
                None => collection
                    .get(id)
                    .ok_or_else(|| TaskBoardError::NotFound(id.clone()))?
                    .with_patch(&patch, self.clock.utc()),
            };
            collection.replace_one(id, record.clone())?;
            Ok(record)
        })
        .await
    }

    async fn run<T>(
        &self,
        kind: MutationKind,
        id: Option<&TaskId>,
        request: impl Future<Output = TaskBoardResult<T>>,
    ) -> TaskBoardResult<T> {
        let pending = self.tracker.begin(kind);
        let task_id = id.map(TaskId::as_str);
        debug!(kind = %pending.kind(), task_id, "task mutation pending");

        let outcome = request.await;
        let resolved = pending.resolve(outcome.is_ok());
        match &outcome {
            Ok(_) => info!(kind = %resolved.kind(), task_id, "task mutation committed"),
            Err(err) => warn!(kind = %resolved.kind(), task_id, error = %err, "task mutation failed"),
        }
        outcome
    }
}
