//! User-supplied drafts and patches, validated before submission.

use super::{
    ActualHours, Difficulty, EstimatedHours, NewTaskRow, OwnerId, ProjectId, StatusChange,
    TaskPriority, TaskRowPatch, TaskStatus, TaskTitle, TaskValidationError,
};
use chrono::{DateTime, Utc};

/// Input for creating a task, as collected from a task form.
///
/// Values are kept raw until [`TaskDraft::into_new_row`] validates them.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    title: String,
    description: Option<String>,
    priority: String,
    difficulty: Option<i64>,
    estimated_hours: Option<f64>,
    due_date: Option<DateTime<Utc>>,
    tags: Vec<String>,
    project_id: Option<ProjectId>,
}

impl TaskDraft {
    /// Creates a draft with the given title and medium priority.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: TaskPriority::default().as_str().to_owned(),
            difficulty: None,
            estimated_hours: None,
            due_date: None,
            tags: Vec::new(),
            project_id: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority wire value.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Sets the difficulty rating.
    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: i64) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Sets the planned effort in hours.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Files the task under a project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Validates the draft and builds the insert for `owner`.
    ///
    /// The status is always [`TaskStatus::Todo`]. A blank description is
    /// submitted as absent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] for a blank or overlong title, an
    /// unknown priority, a difficulty outside `1..=5`, or a non-positive
    /// estimate.
    pub fn into_new_row(self, owner: OwnerId) -> Result<NewTaskRow, TaskValidationError> {
        let title = TaskTitle::new(self.title)?;
        let priority = TaskPriority::try_from(self.priority.as_str())?;
        let difficulty = self.difficulty.map(Difficulty::new).transpose()?;
        let estimated_hours = self.estimated_hours.map(EstimatedHours::new).transpose()?;

        Ok(NewTaskRow {
            user_id: owner,
            project_id: self.project_id,
            title,
            description: normalize_description(self.description),
            priority,
            status: TaskStatus::Todo,
            difficulty,
            estimated_hours,
            due_date: self.due_date,
            tags: self.tags,
        })
    }
}

/// Input for editing specific fields of an existing task.
///
/// Unset fields are left untouched. Nullable fields take an `Option`, where
/// `None` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<Option<String>>,
    priority: Option<String>,
    status: Option<String>,
    difficulty: Option<Option<i64>>,
    estimated_hours: Option<Option<f64>>,
    actual_hours: Option<Option<f64>>,
    due_date: Option<Option<DateTime<Utc>>>,
    tags: Option<Vec<String>>,
    project_id: Option<Option<ProjectId>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Replaces the priority wire value.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Replaces the status wire value.
    ///
    /// The completion timestamp is derived by the mutation coordinator.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces or clears the difficulty rating.
    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: Option<i64>) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Replaces or clears the planned effort.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: Option<f64>) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Replaces or clears the logged effort.
    #[must_use]
    pub const fn with_actual_hours(mut self, hours: Option<f64>) -> Self {
        self.actual_hours = Some(hours);
        self
    }

    /// Replaces or clears the deadline.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Replaces the tag list.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }

    /// Moves the task to another project or out of any project.
    #[must_use]
    pub const fn with_project(mut self, project_id: Option<ProjectId>) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Validates every field the patch sets.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError`] for the first invalid field.
    pub fn validate(self) -> Result<ValidatedPatch, TaskValidationError> {
        let title = self.title.map(TaskTitle::new).transpose()?;
        let priority = self
            .priority
            .as_deref()
            .map(TaskPriority::try_from)
            .transpose()?;
        let status = self
            .status
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()?;
        let difficulty = self
            .difficulty
            .map(|value| value.map(Difficulty::new).transpose())
            .transpose()?;
        let estimated_hours = self
            .estimated_hours
            .map(|value| value.map(EstimatedHours::new).transpose())
            .transpose()?;
        let actual_hours = self
            .actual_hours
            .map(|value| value.map(ActualHours::new).transpose())
            .transpose()?;

        Ok(ValidatedPatch {
            fields: TaskRowPatch {
                title,
                description: self.description.map(normalize_description),
                priority,
                difficulty,
                estimated_hours,
                actual_hours,
                due_date: self.due_date,
                tags: self.tags,
                project_id: self.project_id,
                status_change: None,
            },
            status,
        })
    }
}

/// A patch whose fields have all been validated.
///
/// A requested status is kept apart until the current record is known, so
/// that the completion timestamp can be resolved against it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPatch {
    fields: TaskRowPatch,
    status: Option<TaskStatus>,
}

impl ValidatedPatch {
    /// Returns the requested status, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Builds the wire patch, attaching the resolved status change.
    #[must_use]
    pub fn into_row_patch(self, status_change: Option<StatusChange>) -> TaskRowPatch {
        TaskRowPatch {
            status_change,
            ..self.fields
        }
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|text| !text.trim().is_empty())
}
