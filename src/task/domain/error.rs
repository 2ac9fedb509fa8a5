//! Error types for task validation and boundary conversion.

use thiserror::Error;

/// Errors returned while validating drafts, patches, and scalar task values.
///
/// Validation always happens before any request reaches the persistence
/// collaborator.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskValidationError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the maximum length.
    #[error("task title must be at most {max} characters, got {actual}")]
    TitleTooLong {
        /// Maximum permitted length in characters.
        max: usize,
        /// Length of the rejected title in characters.
        actual: usize,
    },

    /// The difficulty rating is outside the `1..=5` range.
    #[error("difficulty must be between 1 and 5, got {0}")]
    DifficultyOutOfRange(i64),

    /// The estimated effort is zero, negative, or not finite.
    #[error("estimated hours must be a positive number, got {0}")]
    NonPositiveEstimate(f64),

    /// The logged effort is negative or not finite.
    #[error("actual hours must be a non-negative number, got {0}")]
    NegativeActualHours(f64),

    /// The priority value is not recognised.
    #[error(transparent)]
    InvalidPriority(#[from] ParsePriorityError),

    /// The status value is not recognised.
    #[error(transparent)]
    InvalidStatus(#[from] ParseStatusError),
}

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseStatusError(pub String);

/// A record received from the persistence collaborator does not have a
/// valid task shape.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed task data in field '{field}': {reason}")]
pub struct DataShapeError {
    field: &'static str,
    reason: String,
}

impl DataShapeError {
    /// Creates a shape error for the named field.
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the offending field name.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Returns the rejection reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
