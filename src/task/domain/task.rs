//! Task record entity and completion bookkeeping.

use super::{
    ActualHours, DataShapeError, Difficulty, EstimatedHours, OwnerId, ProjectId, TaskId,
    TaskPriority, TaskRowPatch, TaskStatus, TaskTitle,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A task owned by one user.
///
/// A record always satisfies the completion invariant: `completed_at` is set
/// exactly when the status is [`TaskStatus::Completed`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRecord {
    id: TaskId,
    owner: OwnerId,
    project_id: Option<ProjectId>,
    title: TaskTitle,
    description: Option<String>,
    priority: TaskPriority,
    status: TaskStatus,
    difficulty: Option<Difficulty>,
    estimated_hours: Option<EstimatedHours>,
    actual_hours: Option<ActualHours>,
    due_date: Option<DateTime<Utc>>,
    tags: Vec<String>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for assembling a task record from validated parts.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecordData {
    /// Server-assigned identifier.
    pub id: TaskId,
    /// Owning account.
    pub owner: OwnerId,
    /// Project the task is filed under, if any.
    pub project_id: Option<ProjectId>,
    /// Task title.
    pub title: TaskTitle,
    /// Free-form description.
    pub description: Option<String>,
    /// Urgency.
    pub priority: TaskPriority,
    /// Progress status.
    pub status: TaskStatus,
    /// Difficulty rating.
    pub difficulty: Option<Difficulty>,
    /// Planned effort.
    pub estimated_hours: Option<EstimatedHours>,
    /// Logged effort.
    pub actual_hours: Option<ActualHours>,
    /// Deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Ordered tags.
    pub tags: Vec<String>,
    /// Completion timestamp; must be set exactly when the task is completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Server-assigned modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Assembles a record, enforcing the completion invariant.
    ///
    /// # Errors
    ///
    /// Returns [`DataShapeError`] for `completed_at` when the completion
    /// timestamp disagrees with the status.
    pub fn from_data(data: TaskRecordData) -> Result<Self, DataShapeError> {
        match (data.status.is_completed(), data.completed_at.is_some()) {
            (true, false) => {
                return Err(DataShapeError::new(
                    "completed_at",
                    "completed task has no completion timestamp",
                ));
            }
            (false, true) => {
                return Err(DataShapeError::new(
                    "completed_at",
                    format!("task with status '{}' has a completion timestamp", data.status),
                ));
            }
            _ => {}
        }

        Ok(Self {
            id: data.id,
            owner: data.owner,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            difficulty: data.difficulty,
            estimated_hours: data.estimated_hours,
            actual_hours: data.actual_hours,
            due_date: data.due_date,
            tags: data.tags,
            completed_at: data.completed_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the owning account.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Returns the project the task is filed under, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the difficulty rating, if any.
    #[must_use]
    pub const fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// Returns the planned effort, if any.
    #[must_use]
    pub const fn estimated_hours(&self) -> Option<EstimatedHours> {
        self.estimated_hours
    }

    /// Returns the logged effort, if any.
    #[must_use]
    pub const fn actual_hours(&self) -> Option<ActualHours> {
        self.actual_hours
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the tags in order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the completion timestamp, present only for completed tasks.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    /// Returns `true` when the deadline has passed and the task is still open.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed() && self.due_date.is_some_and(|due| due < now)
    }

    /// Returns a copy with every field named by a confirmed patch applied
    /// and the modification time set to `updated_at`.
    ///
    /// Fields absent from the patch keep their current values.
    #[must_use]
    pub fn with_patch(&self, patch: &TaskRowPatch, updated_at: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.updated_at = updated_at;
        if let Some(title) = &patch.title {
            next.title = title.clone();
        }
        if let Some(description) = &patch.description {
            next.description.clone_from(description);
        }
        if let Some(priority) = patch.priority {
            next.priority = priority;
        }
        if let Some(difficulty) = patch.difficulty {
            next.difficulty = difficulty;
        }
        if let Some(estimated_hours) = patch.estimated_hours {
            next.estimated_hours = estimated_hours;
        }
        if let Some(actual_hours) = patch.actual_hours {
            next.actual_hours = actual_hours;
        }
        if let Some(due_date) = patch.due_date {
            next.due_date = due_date;
        }
        if let Some(tags) = &patch.tags {
            next.tags.clone_from(tags);
        }
        if let Some(project_id) = patch.project_id {
            next.project_id = project_id;
        }
        if let Some(change) = patch.status_change {
            next.status = change.status;
            next.completed_at = change.completed_at;
        }
        next
    }
}

/// A status transition together with the completion timestamp it implies.
///
/// Constructing the pair in one place keeps `completed_at` consistent with
/// the status on both the wire and in local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    status: TaskStatus,
    completed_at: Option<DateTime<Utc>>,
}

impl StatusChange {
    /// Resolves the change that moves `current` to `target` at `now`.
    ///
    /// Entering [`TaskStatus::Completed`] stamps `now`; staying completed
    /// keeps the original timestamp; any other target clears it.
    #[must_use]
    pub fn resolve(current: &TaskRecord, target: TaskStatus, now: DateTime<Utc>) -> Self {
        let completed_at = if target.is_completed() {
            current.completed_at.or(Some(now))
        } else {
            None
        };
        Self {
            status: target,
            completed_at,
        }
    }

    /// Resolves the change a completion toggle applies to `current`.
    #[must_use]
    pub fn toggle(current: &TaskRecord, now: DateTime<Utc>) -> Self {
        Self::resolve(current, current.status.toggled(), now)
    }

    /// Returns the target status.
    #[must_use]
    pub const fn status(self) -> TaskStatus {
        self.status
    }

    /// Returns the completion timestamp to store.
    #[must_use]
    pub const fn completed_at(self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}
