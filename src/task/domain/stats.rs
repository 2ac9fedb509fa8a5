//! Summary counts shown above a task list.

use super::TaskRecord;
use chrono::{DateTime, Utc};

/// Task counts by completion state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of tasks.
    pub total: usize,
    /// Tasks with status `completed`.
    pub completed: usize,
    /// Tasks with any other status.
    pub pending: usize,
    /// Open tasks whose deadline is before `now`.
    pub overdue: usize,
}

impl TaskStats {
    /// Tallies `records` as of `now`.
    #[must_use]
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a TaskRecord>, now: DateTime<Utc>) -> Self {
        records.into_iter().fold(Self::default(), |mut stats, record| {
            stats.total += 1;
            if record.is_completed() {
                stats.completed += 1;
            } else {
                stats.pending += 1;
            }
            if record.is_overdue(now) {
                stats.overdue += 1;
            }
            stats
        })
    }
}
