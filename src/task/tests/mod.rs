//! Unit tests for the task collection view model.


use crate::task::domain::{OwnerId, TaskRecord, TaskRow};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Clock frozen at a settable instant.
pub(super) struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub(super) fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub(super) fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

pub(super) fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Builds a well-formed open task row.
pub(super) fn open_row(id: &str, owner: OwnerId, title: &str, created_at: DateTime<Utc>) -> TaskRow {
    TaskRow {
        id: id.to_owned(),
        user_id: owner.to_string(),
        project_id: None,
        title: title.to_owned(),
        description: None,
        priority: "medium".to_owned(),
        status: "todo".to_owned(),
        difficulty: None,
        estimated_hours: None,
        actual_hours: None,
        due_date: None,
        tags: None,
        completed_at: None,
        created_at,
        updated_at: created_at,
    }
}

/// Builds a well-formed completed task row.
pub(super) fn completed_row(
    id: &str,
    owner: OwnerId,
    title: &str,
    created_at: DateTime<Utc>,
) -> TaskRow {
    TaskRow {
        status: "completed".to_owned(),
        completed_at: Some(created_at + Duration::hours(1)),
        ..open_row(id, owner, title, created_at)
    }
}

pub(super) fn record(row: TaskRow) -> TaskRecord {
    TaskRecord::try_from(row).expect("valid task row")
}
