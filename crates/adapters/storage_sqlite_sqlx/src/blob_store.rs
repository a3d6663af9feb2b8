//! `SQLite` implementation of [`BlobStore`].

use sqlx::SqlitePool;

use awaybot_app::ports::{BlobError, BlobStore};

use crate::error::StorageError;

/// `SQLite`-backed blob store over the `objects` table.
pub struct SqliteBlobStore {
    pool: SqlitePool,
}

impl SqliteBlobStore {
    /// Create a new store backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn backend(key: &str, err: sqlx::Error) -> BlobError {
    BlobError::from_backend(key, StorageError::from(err))
}

impl BlobStore for SqliteBlobStore {
    async fn list_objects(&self, namespace: &str, prefix: &str) -> Result<Vec<String>, BlobError> {
        // substr rather than LIKE so `%` and `_` in user ids match literally.
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT key FROM objects WHERE namespace = ? AND substr(key, 1, length(?)) = ? ORDER BY key",
        )
        .bind(namespace)
        .bind(prefix)
        .bind(prefix)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| backend(prefix, err))?;
        Ok(rows.into_iter().map(|(key,)| key).collect())
    }

    async fn get_object(&self, namespace: &str, key: &str) -> Result<Vec<u8>, BlobError> {
        let row: Option<(Vec<u8>,)> =
            sqlx::query_as("SELECT data FROM objects WHERE namespace = ? AND key = ?")
                .bind(namespace)
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(|err| backend(key, err))?;
        row.map(|(data,)| data).ok_or_else(|| BlobError::NotFound {
            key: key.to_string(),
        })
    }

    async fn put_object(&self, namespace: &str, key: &str, data: Vec<u8>) -> Result<(), BlobError> {
        sqlx::query(
            "INSERT INTO objects (namespace, key, data, updated_at) VALUES (?, ?, ?, ?) \
             ON CONFLICT (namespace, key) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
        )
        .bind(namespace)
        .bind(key)
        .bind(data)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|err| backend(key, err))?;
        Ok(())
    }
}
