//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PgTaskRow {
    /// Server-assigned identifier.
    pub id: uuid::Uuid,
    /// Owning account identifier.
    pub user_id: uuid::Uuid,
    /// Project identifier.
    pub project_id: Option<uuid::Uuid>,
    /// Task title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Priority wire value.
    pub priority: String,
    /// Status wire value.
    pub status: String,
    /// Difficulty rating.
    pub difficulty: Option<i32>,
    /// Planned effort in hours.
    pub estimated_hours: Option<f64>,
    /// Logged effort in hours.
    pub actual_hours: Option<f64>,
    /// Deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Tags.
    pub tags: Option<Vec<String>>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewPgTaskRow {
    /// Server-assigned identifier.
    pub id: uuid::Uuid,
    /// Owning account identifier.
    pub user_id: uuid::Uuid,
    /// Project identifier.
    pub project_id: Option<uuid::Uuid>,
    /// Task title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Priority wire value.
    pub priority: String,
    /// Status wire value.
    pub status: String,
    /// Difficulty rating.
    pub difficulty: Option<i32>,
    /// Planned effort in hours.
    pub estimated_hours: Option<f64>,
    /// Deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Tags.
    pub tags: Option<Vec<String>>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update for task records.
///
/// `None` skips a column; `Some(None)` writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct PgTaskChangeset {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<Option<String>>,
    /// New priority wire value.
    pub priority: Option<String>,
    /// New status wire value.
    pub status: Option<String>,
    /// New difficulty rating.
    pub difficulty: Option<Option<i32>>,
    /// New planned effort.
    pub estimated_hours: Option<Option<f64>>,
    /// New logged effort.
    pub actual_hours: Option<Option<f64>>,
    /// New deadline.
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// Replacement tags.
    pub tags: Option<Option<Vec<String>>>,
    /// New project assignment.
    pub project_id: Option<Option<uuid::Uuid>>,
    /// New completion timestamp.
    pub completed_at: Option<Option<DateTime<Utc>>>,
    /// Modification timestamp; always written.
    pub updated_at: DateTime<Utc>,
}
