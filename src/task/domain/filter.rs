//! Search and filter predicates over task records.

use super::{ParsePriorityError, ParseStatusError, TaskPriority, TaskRecord, TaskStatus};

/// Wire value selecting every priority or status.
pub const ALL_FILTER: &str = "all";

/// Priority filter: everything, or one priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PriorityFilter {
    /// Match every priority.
    #[default]
    All,
    /// Match only the given priority.
    Only(TaskPriority),
}

impl PriorityFilter {
    /// Returns `true` when `priority` passes the filter.
    #[must_use]
    pub fn admits(self, priority: TaskPriority) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == priority,
        }
    }
}

impl TryFrom<&str> for PriorityFilter {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case(ALL_FILTER) {
            return Ok(Self::All);
        }
        TaskPriority::try_from(value).map(Self::Only)
    }
}

/// Status filter: everything, or one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    /// Match every status.
    #[default]
    All,
    /// Match only the given status.
    Only(TaskStatus),
}

impl StatusFilter {
    /// Returns `true` when `status` passes the filter.
    #[must_use]
    pub fn admits(self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl TryFrom<&str> for StatusFilter {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case(ALL_FILTER) {
            return Ok(Self::All);
        }
        TaskStatus::try_from(value).map(Self::Only)
    }
}

/// Returns `true` when `record` passes the search query and both filters.
///
/// The query matches case-insensitively against the title or the
/// description, comparing Unicode case folds so `STRASSE` finds `Straße`.
/// An empty query matches everything; a missing description never matches
/// a non-empty query.
#[must_use]
pub fn matches(
    record: &TaskRecord,
    query: &str,
    priority: PriorityFilter,
    status: StatusFilter,
) -> bool {
    matches_text(record, &fold_case(query))
        && priority.admits(record.priority())
        && status.admits(record.status())
}

fn matches_text(record: &TaskRecord, needle: &str) -> bool {
    needle.is_empty()
        || fold_case(record.title().as_str()).contains(needle)
        || record
            .description()
            .is_some_and(|description| fold_case(description).contains(needle))
}

/// Folds case one character at a time so a text and its uppercase form
/// always fold to the same string.
fn fold_case(text: &str) -> String {
    text.chars()
        .flat_map(char::to_uppercase)
        .flat_map(char::to_lowercase)
        .collect()
}

/// The search box and filter selections of a task list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    query: String,
    needle: String,
    priority: PriorityFilter,
    status: StatusFilter,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.set_query(query);
        self
    }

    /// Sets the priority filter.
    #[must_use]
    pub const fn with_priority(mut self, priority: PriorityFilter) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the status filter.
    #[must_use]
    pub const fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Replaces the free-text query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.needle = fold_case(&self.query);
    }

    /// Replaces the priority filter.
    pub const fn set_priority(&mut self, priority: PriorityFilter) {
        self.priority = priority;
    }

    /// Replaces the status filter.
    pub const fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
    }

    /// Returns the free-text query as typed.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the priority filter.
    #[must_use]
    pub const fn priority(&self) -> PriorityFilter {
        self.priority
    }

    /// Returns the status filter.
    #[must_use]
    pub const fn status(&self) -> StatusFilter {
        self.status
    }

    /// Returns `true` when any criterion narrows the list.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
            || self.priority != PriorityFilter::All
            || self.status != StatusFilter::All
    }

    /// Resets every criterion so the filter matches everything again.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` when `record` passes every criterion.
    #[must_use]
    pub fn matches(&self, record: &TaskRecord) -> bool {
        matches_text(record, &self.needle)
            && self.priority.admits(record.priority())
            && self.status.admits(record.status())
    }
}
