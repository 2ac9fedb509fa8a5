//! `PostgreSQL` persistence implementation for task rows.

use super::{
    models::{NewPgTaskRow, PgTaskChangeset, PgTaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{NewTaskRow, OwnerId, TaskId, TaskRow, TaskRowPatch},
    ports::{PersistenceResult, RemoteError, TaskPersistence},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task persistence.
///
/// Identifiers are random UUIDs; timestamps come from the injected clock.
#[derive(Clone)]
pub struct PostgresTaskPersistence {
    pool: TaskPgPool,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl PostgresTaskPersistence {
    /// Creates a persistence adapter stamped by the system clock.
    #[must_use]
    pub fn new(pool: TaskPgPool) -> Self {
        Self::with_clock(pool, Arc::new(DefaultClock))
    }

    /// Creates a persistence adapter stamped by `clock`.
    #[must_use]
    pub fn with_clock(pool: TaskPgPool, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> PersistenceResult<T>
    where
        F: FnOnce(&mut PgConnection) -> PersistenceResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RemoteError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RemoteError::persistence)?
    }
}

#[async_trait]
impl TaskPersistence for PostgresTaskPersistence {
    async fn list_by_owner(&self, owner: OwnerId) -> PersistenceResult<Vec<TaskRow>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::user_id.eq(owner.into_inner()))
                .order(tasks::created_at.desc())
                .select(PgTaskRow::as_select())
                .load::<PgTaskRow>(connection)
                .map_err(RemoteError::persistence)?;
            Ok(rows.into_iter().map(to_task_row).collect())
        })
        .await
    }

    async fn insert_record(&self, row: NewTaskRow) -> PersistenceResult<TaskRow> {
        let new_row = to_new_row(row, self.clock.utc());
        self.run_blocking(move |connection| {
            let stored = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(PgTaskRow::as_returning())
                .get_result::<PgTaskRow>(connection)
                .map_err(RemoteError::persistence)?;
            Ok(to_task_row(stored))
        })
        .await
    }

    async fn update_record(
        &self,
        id: TaskId,
        patch: TaskRowPatch,
    ) -> PersistenceResult<Option<TaskRow>> {
        let key = parse_task_key(&id)?;
        let changeset = to_changeset(&patch, self.clock.utc());
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(key))
                .set(&changeset)
                .returning(PgTaskRow::as_returning())
                .get_result::<PgTaskRow>(connection)
                .optional()
                .map_err(RemoteError::persistence)?
                .ok_or_else(|| RemoteError::rejected(format!("no task row with id {id}")))?;
            Ok(Some(to_task_row(updated)))
        })
        .await
    }

    async fn delete_record(&self, id: TaskId) -> PersistenceResult<()> {
        let key = parse_task_key(&id)?;
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(key))
                .execute(connection)
                .map_err(RemoteError::persistence)?;
            if deleted == 0 {
                return Err(RemoteError::rejected(format!("no task row with id {id}")));
            }
            Ok(())
        })
        .await
    }
}

fn parse_task_key(id: &TaskId) -> PersistenceResult<Uuid> {
    Uuid::parse_str(id.as_str()).map_err(RemoteError::persistence)
}

fn to_new_row(row: NewTaskRow, now: DateTime<Utc>) -> NewPgTaskRow {
    NewPgTaskRow {
        id: Uuid::new_v4(),
        user_id: row.user_id.into_inner(),
        project_id: row.project_id.map(|project| project.into_inner()),
        title: row.title.as_str().to_owned(),
        description: row.description,
        priority: row.priority.as_str().to_owned(),
        status: row.status.as_str().to_owned(),
        difficulty: row.difficulty.map(|rating| i32::from(rating.value())),
        estimated_hours: row.estimated_hours.map(|hours| hours.value()),
        due_date: row.due_date,
        tags: Some(row.tags),
        completed_at: None,
        created_at: now,
        updated_at: now,
    }
}

fn to_changeset(patch: &TaskRowPatch, now: DateTime<Utc>) -> PgTaskChangeset {
    PgTaskChangeset {
        title: patch.title.as_ref().map(|title| title.as_str().to_owned()),
        description: patch.description.clone(),
        priority: patch.priority.map(|priority| priority.as_str().to_owned()),
        status: patch
            .status_change
            .map(|change| change.status().as_str().to_owned()),
        difficulty: patch
            .difficulty
            .map(|rating| rating.map(|value| i32::from(value.value()))),
        estimated_hours: patch
            .estimated_hours
            .map(|hours| hours.map(|value| value.value())),
        actual_hours: patch
            .actual_hours
            .map(|hours| hours.map(|value| value.value())),
        due_date: patch.due_date,
        tags: patch.tags.clone().map(Some),
        project_id: patch
            .project_id
            .map(|project| project.map(|value| value.into_inner())),
        completed_at: patch.status_change.map(|change| change.completed_at()),
        updated_at: now,
    }
}

fn to_task_row(row: PgTaskRow) -> TaskRow {
    TaskRow {
        id: row.id.to_string(),
        user_id: row.user_id.to_string(),
        project_id: row.project_id.map(|project| project.to_string()),
        title: row.title,
        description: row.description,
        priority: row.priority,
        status: row.status,
        difficulty: row.difficulty.map(i64::from),
        estimated_hours: row.estimated_hours,
        actual_hours: row.actual_hours,
        due_date: row.due_date,
        tags: row.tags,
        completed_at: row.completed_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}
