//! `PostgreSQL` adapter for task persistence.

mod models;
mod repository;
mod schema;
mod settings;

pub use repository::{PostgresTaskPersistence, TaskPgPool};
pub use settings::{
    CONNECT_TIMEOUT_ENV, DATABASE_URL_ENV, FALLBACK_DATABASE_URL_ENV, MAX_CONNECTIONS_ENV,
    PostgresSettings, SettingsError,
};
