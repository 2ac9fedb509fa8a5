//! Validated scalar values carried by task records.

use super::TaskValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trimmed, non-empty task title of at most [`TaskTitle::MAX_CHARS`]
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Maximum title length in characters.
    pub const MAX_CHARS: usize = 100;

    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::EmptyTitle`] when the value is blank
    /// and [`TaskValidationError::TitleTooLong`] when it exceeds
    /// [`TaskTitle::MAX_CHARS`].
    pub fn new(value: impl Into<String>) -> Result<Self, TaskValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        let actual = trimmed.chars().count();
        if actual > Self::MAX_CHARS {
            return Err(TaskValidationError::TitleTooLong {
                max: Self::MAX_CHARS,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Difficulty rating from 1 (trivial) to 5 (hard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Difficulty(u8);

impl Difficulty {
    /// Lowest rating.
    pub const MIN: u8 = 1;
    /// Highest rating.
    pub const MAX: u8 = 5;

    /// Creates a validated difficulty rating.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::DifficultyOutOfRange`] unless
    /// `1 <= value <= 5`.
    pub fn new(value: i64) -> Result<Self, TaskValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|rating| (Self::MIN..=Self::MAX).contains(rating))
            .map(Self)
            .ok_or(TaskValidationError::DifficultyOutOfRange(value))
    }

    /// Returns the rating.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Planned effort in hours; always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstimatedHours(f64);

impl EstimatedHours {
    /// Creates a validated estimate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::NonPositiveEstimate`] for zero,
    /// negative, or non-finite values.
    pub fn new(value: f64) -> Result<Self, TaskValidationError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(TaskValidationError::NonPositiveEstimate(value))
        }
    }

    /// Returns the estimate in hours.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Logged effort in hours; always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActualHours(f64);

impl ActualHours {
    /// Creates a validated effort log value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskValidationError::NegativeActualHours`] for negative or
    /// non-finite values.
    pub fn new(value: f64) -> Result<Self, TaskValidationError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(TaskValidationError::NegativeActualHours(value))
        }
    }

    /// Returns the logged hours.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Splits a comma-separated tag list, trimming each tag and dropping blanks.
///
/// ```
/// use taskdeck::task::domain::parse_tags;
///
/// assert_eq!(parse_tags(" cs101, lab ,, exam"), vec!["cs101", "lab", "exam"]);
/// ```
#[must_use]
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}
