//! `SQLite` connection pool setup and migration runner.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StorageError;

/// Configuration for the `SQLite` storage adapter.
#[derive(Debug, Clone)]
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:awaybot.db` or `sqlite::memory:`).
    pub database_url: String,
    /// Upper bound on open connections. One operation per process needs one.
    pub max_connections: u32,
}

impl Config {
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 1,
        }
    }

    /// Build a [`Database`] from this configuration.
    ///
    /// Creates the database file if missing and runs all pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is malformed or the connection or
    /// migrations fail.
    pub async fn build(self) -> Result<Database, StorageError> {
        let options = SqliteConnectOptions::from_str(&self.database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(self.max_connections.max(1))
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Database { pool })
    }
}

/// Holds the `SQLite` connection pool and provides access to it.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Wait for pending writes and close every connection.
    pub async fn close(self) {
        self.pool.close().await;
    }
}
