//! Wire shapes exchanged with the persistence collaborator.
//!
//! [`TaskRow`] is what the backend hands back: enum values as free text, a
//! nullable tag array, and signed integers. It is converted into a
//! [`TaskRecord`] at the boundary and rejected with [`DataShapeError`]
//! rather than coerced. [`NewTaskRow`] and [`TaskRowPatch`] travel the other
//! way and are already validated.

use super::{
    ActualHours, DataShapeError, Difficulty, EstimatedHours, OwnerId, ProjectId, StatusChange,
    TaskId, TaskPriority, TaskRecord, TaskRecordData, TaskStatus, TaskTitle,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task row as returned by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRow {
    /// Server-assigned identifier.
    pub id: String,
    /// Owning account identifier.
    pub user_id: String,
    /// Project identifier, if any.
    pub project_id: Option<String>,
    /// Title text.
    pub title: String,
    /// Description text.
    pub description: Option<String>,
    /// Priority wire value.
    pub priority: String,
    /// Status wire value.
    pub status: String,
    /// Difficulty rating.
    pub difficulty: Option<i64>,
    /// Planned effort in hours.
    pub estimated_hours: Option<f64>,
    /// Logged effort in hours.
    pub actual_hours: Option<f64>,
    /// Deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Tags; the column is nullable.
    pub tags: Option<Vec<String>>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for TaskRecord {
    type Error = DataShapeError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        if row.id.trim().is_empty() {
            return Err(DataShapeError::new("id", "identifier is empty"));
        }
        let owner = parse_uuid("user_id", &row.user_id).map(OwnerId::from_uuid)?;
        let project_id = row
            .project_id
            .as_deref()
            .map(|raw| parse_uuid("project_id", raw).map(ProjectId::from_uuid))
            .transpose()?;
        let title = TaskTitle::new(row.title).map_err(|err| shape("title", &err))?;
        let priority =
            TaskPriority::try_from(row.priority.as_str()).map_err(|err| shape("priority", &err))?;
        let status =
            TaskStatus::try_from(row.status.as_str()).map_err(|err| shape("status", &err))?;
        let difficulty = row
            .difficulty
            .map(Difficulty::new)
            .transpose()
            .map_err(|err| shape("difficulty", &err))?;
        let estimated_hours = row
            .estimated_hours
            .map(EstimatedHours::new)
            .transpose()
            .map_err(|err| shape("estimated_hours", &err))?;
        let actual_hours = row
            .actual_hours
            .map(ActualHours::new)
            .transpose()
            .map_err(|err| shape("actual_hours", &err))?;

        Self::from_data(TaskRecordData {
            id: TaskId::new(row.id),
            owner,
            project_id,
            title,
            description: row.description,
            priority,
            status,
            difficulty,
            estimated_hours,
            actual_hours,
            due_date: row.due_date,
            tags: row.tags.unwrap_or_default(),
            completed_at: row.completed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn parse_uuid(field: &'static str, raw: &str) -> Result<Uuid, DataShapeError> {
    Uuid::parse_str(raw).map_err(|err| DataShapeError::new(field, err.to_string()))
}

fn shape(field: &'static str, err: &impl std::error::Error) -> DataShapeError {
    DataShapeError::new(field, err.to_string())
}

/// Decodes a JSON array of task rows, such as a hosted backend's REST
/// response body.
///
/// # Errors
///
/// Returns [`DataShapeError`] for `payload` when the body is not an array of
/// row objects.
pub fn decode_rows(payload: &str) -> Result<Vec<TaskRow>, DataShapeError> {
    serde_json::from_str(payload).map_err(|err| DataShapeError::new("payload", err.to_string()))
}

/// A validated insert submitted to the persistence collaborator.
///
/// Built from a [`super::TaskDraft`], which forces the status to
/// [`TaskStatus::Todo`]; the collaborator assigns the identifier and
/// timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTaskRow {
    /// Owning account.
    pub user_id: OwnerId,
    /// Project the task is filed under.
    pub project_id: Option<ProjectId>,
    /// Task title.
    pub title: TaskTitle,
    /// Description.
    pub description: Option<String>,
    /// Priority.
    pub priority: TaskPriority,
    /// Initial status.
    pub status: TaskStatus,
    /// Difficulty rating.
    pub difficulty: Option<Difficulty>,
    /// Planned effort.
    pub estimated_hours: Option<EstimatedHours>,
    /// Deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Ordered tags.
    pub tags: Vec<String>,
}

/// A validated partial update submitted to the persistence collaborator.
///
/// `None` leaves a field untouched. For nullable fields, `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskRowPatch {
    /// New title.
    pub title: Option<TaskTitle>,
    /// New description.
    pub description: Option<Option<String>>,
    /// New priority.
    pub priority: Option<TaskPriority>,
    /// New difficulty rating.
    pub difficulty: Option<Option<Difficulty>>,
    /// New planned effort.
    pub estimated_hours: Option<Option<EstimatedHours>>,
    /// New logged effort.
    pub actual_hours: Option<Option<ActualHours>>,
    /// New deadline.
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// Replacement tag list.
    pub tags: Option<Vec<String>>,
    /// New project assignment.
    pub project_id: Option<Option<ProjectId>>,
    /// New status together with its completion timestamp.
    pub status_change: Option<StatusChange>,
}

impl TaskRowPatch {
    /// Creates a patch that only changes status and completion timestamp.
    #[must_use]
    pub fn status_only(change: StatusChange) -> Self {
        Self {
            status_change: Some(change),
            ..Self::default()
        }
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
