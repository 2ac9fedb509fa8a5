//! In-memory persistence backend with scriptable failures.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use crate::task::{
    domain::{NewTaskRow, OwnerId, TaskId, TaskRow, TaskRowPatch},
    ports::{PersistenceResult, RemoteError, TaskPersistence},
};

/// Thread-safe in-memory stand-in for the hosted task backend.
///
/// Identifiers are random UUIDs and timestamps come from the injected
/// clock. Tests can script the next calls to fail and can make updates
/// confirm without returning the updated row.
pub struct InMemoryTaskPersistence<C = DefaultClock> {
    state: Arc<RwLock<InMemoryPersistenceState>>,
    clock: Arc<C>,
}

#[derive(Debug)]
struct InMemoryPersistenceState {
    rows: Vec<TaskRow>,
    scripted_failures: VecDeque<String>,
    return_update_representation: bool,
    calls: usize,
}

impl Default for InMemoryPersistenceState {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            scripted_failures: VecDeque::new(),
            return_update_representation: true,
            calls: 0,
        }
    }
}

impl InMemoryTaskPersistence<DefaultClock> {
    /// Creates an empty backend stamped by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTaskPersistence<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for InMemoryTaskPersistence<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> InMemoryTaskPersistence<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty backend stamped by `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryPersistenceState::default())),
            clock,
        }
    }

    /// Makes the next call fail with `message`.
    ///
    /// Failures queue up: scripting two failures fails the next two calls.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.state_mut().scripted_failures.push_back(message.into());
    }

    /// Controls whether updates return the updated row (the default) or only
    /// confirm the write.
    pub fn return_update_representation(&self, enabled: bool) {
        self.state_mut().return_update_representation = enabled;
    }

    /// Stores a row exactly as given, bypassing validation.
    pub fn seed(&self, row: TaskRow) {
        self.state_mut().rows.push(row);
    }

    /// Returns a snapshot of the stored rows in insertion order.
    #[must_use]
    pub fn rows(&self) -> Vec<TaskRow> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .rows
            .clone()
    }

    /// Returns how many port calls have been made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .calls
    }

    fn state_mut(&self) -> RwLockWriteGuard<'_, InMemoryPersistenceState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the state for one port call, counting it and consuming a
    /// scripted failure if one is queued.
    fn begin_call(&self) -> PersistenceResult<RwLockWriteGuard<'_, InMemoryPersistenceState>> {
        let mut state = self
            .state
            .write()
            .map_err(|err| RemoteError::persistence(std::io::Error::other(err.to_string())))?;
        state.calls += 1;
        if let Some(message) = state.scripted_failures.pop_front() {
            return Err(RemoteError::Rejected(message));
        }
        Ok(state)
    }
}

#[async_trait]
impl<C> TaskPersistence for InMemoryTaskPersistence<C>
where
    C: Clock + Send + Sync,
{
    async fn list_by_owner(&self, owner: OwnerId) -> PersistenceResult<Vec<TaskRow>> {
        let state = self.begin_call()?;
        let owner_key = owner.to_string();
        Ok(state
            .rows
            .iter()
            .filter(|row| row.user_id == owner_key)
            .cloned()
            .collect())
    }

    async fn insert_record(&self, row: NewTaskRow) -> PersistenceResult<TaskRow> {
        let now = self.clock.utc();
        let mut state = self.begin_call()?;
        let stored = to_row(row, &TaskId::generate(), now);
        state.rows.push(stored.clone());
        Ok(stored)
    }

    async fn update_record(
        &self,
        id: TaskId,
        patch: TaskRowPatch,
    ) -> PersistenceResult<Option<TaskRow>> {
        let now = self.clock.utc();
        let mut state = self.begin_call()?;
        let return_representation = state.return_update_representation;
        let row = state
            .rows
            .iter_mut()
            .find(|row| row.id == id.as_str())
            .ok_or_else(|| RemoteError::rejected(format!("no task row with id {id}")))?;
        apply_patch(row, &patch, now);
        Ok(return_representation.then(|| row.clone()))
    }

    async fn delete_record(&self, id: TaskId) -> PersistenceResult<()> {
        let mut state = self.begin_call()?;
        let position = state
            .rows
            .iter()
            .position(|row| row.id == id.as_str())
            .ok_or_else(|| RemoteError::rejected(format!("no task row with id {id}")))?;
        state.rows.remove(position);
        Ok(())
    }
}

fn to_row(row: NewTaskRow, id: &TaskId, now: DateTime<Utc>) -> TaskRow {
    TaskRow {
        id: id.to_string(),
        user_id: row.user_id.to_string(),
        project_id: row.project_id.map(|project| project.to_string()),
        title: row.title.as_str().to_owned(),
        description: row.description,
        priority: row.priority.as_str().to_owned(),
        status: row.status.as_str().to_owned(),
        difficulty: row.difficulty.map(|rating| i64::from(rating.value())),
        estimated_hours: row.estimated_hours.map(|hours| hours.value()),
        actual_hours: None,
        due_date: row.due_date,
        tags: Some(row.tags),
        completed_at: None,
        created_at: now,
        updated_at: now,
    }
}

fn apply_patch(row: &mut TaskRow, patch: &TaskRowPatch, now: DateTime<Utc>) {
    if let Some(title) = &patch.title {
        row.title = title.as_str().to_owned();
    }
    if let Some(description) = &patch.description {
        row.description.clone_from(description);
    }
    if let Some(priority) = patch.priority {
        row.priority = priority.as_str().to_owned();
    }
    if let Some(difficulty) = patch.difficulty {
        row.difficulty = difficulty.map(|rating| i64::from(rating.value()));
    }
    if let Some(estimated_hours) = patch.estimated_hours {
        row.estimated_hours = estimated_hours.map(|hours| hours.value());
    }
    if let Some(actual_hours) = patch.actual_hours {
        row.actual_hours = actual_hours.map(|hours| hours.value());
    }
    if let Some(due_date) = patch.due_date {
        row.due_date = due_date;
    }
    if let Some(tags) = &patch.tags {
        row.tags = Some(tags.clone());
    }
    if let Some(project_id) = patch.project_id {
        row.project_id = project_id.map(|project| project.to_string());
    }
    if let Some(change) = patch.status_change {
        row.status = change.status().as_str().to_owned();
        row.completed_at = change.completed_at();
    }
    row.updated_at = now;
}
