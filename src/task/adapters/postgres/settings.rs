//! Connection settings for the `PostgreSQL` adapter.

use super::TaskPgPool;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Primary environment variable holding the database URL.
pub const DATABASE_URL_ENV: &str = "TASKDECK_DATABASE_URL";
/// Fallback environment variable holding the database URL.
pub const FALLBACK_DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable overriding the pool size.
pub const MAX_CONNECTIONS_ENV: &str = "TASKDECK_DB_MAX_CONNECTIONS";
/// Environment variable overriding the connection timeout in seconds.
pub const CONNECT_TIMEOUT_ENV: &str = "TASKDECK_DB_CONNECT_TIMEOUT_SECS";

/// Connection pool settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostgresSettings {
    /// `postgres://` connection URL.
    pub database_url: String,
    /// Maximum pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Seconds to wait for a connection before failing.
    #[serde(default = "default_connection_timeout_secs")]
    pub connection_timeout_secs: u64,
}

const fn default_max_connections() -> u32 {
    4
}

const fn default_connection_timeout_secs() -> u64 {
    10
}

/// Errors raised while loading settings or building the pool.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// No database URL is configured.
    #[error("neither TASKDECK_DATABASE_URL nor DATABASE_URL is set")]
    MissingDatabaseUrl,

    /// A numeric setting could not be parsed.
    #[error("invalid value '{value}' for {name}")]
    InvalidNumber {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
}

impl PostgresSettings {
    /// Creates settings for `database_url` with default pool limits.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: default_max_connections(),
            connection_timeout_secs: default_connection_timeout_secs(),
        }
    }

    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when no URL variable is
    /// set and [`SettingsError::InvalidNumber`] when a limit is not a number.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads settings through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`PostgresSettings::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let present = |name: &str| lookup(name).filter(|url: &String| !url.trim().is_empty());
        let database_url = present(DATABASE_URL_ENV)
            .or_else(|| present(FALLBACK_DATABASE_URL_ENV))
            .ok_or(SettingsError::MissingDatabaseUrl)?;
        let mut settings = Self::new(database_url);
        if let Some(raw) = lookup(MAX_CONNECTIONS_ENV) {
            settings.max_connections = parse_number(MAX_CONNECTIONS_ENV, raw)?;
        }
        if let Some(raw) = lookup(CONNECT_TIMEOUT_ENV) {
            settings.connection_timeout_secs = parse_number(CONNECT_TIMEOUT_ENV, raw)?;
        }
        Ok(settings)
    }

    /// Builds a connection pool from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Pool`] when the pool cannot open its initial
    /// connections.
    pub fn build_pool(&self) -> Result<TaskPgPool, SettingsError> {
        let manager = ConnectionManager::<PgConnection>::new(self.database_url.as_str());
        let pool = Pool::builder()
            .max_size(self.max_connections)
            .connection_timeout(Duration::from_secs(self.connection_timeout_secs))
            .build(manager)?;
        Ok(pool)
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, raw: String) -> Result<T, SettingsError> {
    raw.trim()
        .parse()
        .map_err(|_| SettingsError::InvalidNumber { name, value: raw })
}
