//! SQLite implementation of the url store.

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::repositories::UrlStore;
use crate::error::StorageError;
use crate::utils::db_error::is_unique_violation;

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite store backed by a single `url` table with a unique alias column.
///
/// Uses SQLx prepared statements for SQL injection protection.
#[derive(Clone)]
pub struct SqliteUrlStore {
    pool: Arc<SqlitePool>,
}

impl SqliteUrlStore {
    /// Creates a store from an existing pool. The schema must already exist.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Opens (or creates) the database file at `path` and applies migrations.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the parent directory cannot be created,
    /// [`StorageError::Database`] if the file cannot be opened, and
    /// [`StorageError::Migration`] if the schema cannot be applied.
    pub async fn open(path: impl AsRef<Path>, max_connections: u32) -> Result<Self, StorageError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::debug!(path = %path.display(), "storage schema ready");

        Ok(Self::new(Arc::new(pool)))
    }

    /// Returns the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        self.pool.as_ref()
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UrlStore for SqliteUrlStore {
    async fn save_url(&self, url: &str, alias: &str) -> Result<i64, StorageError> {
        if url.is_empty() {
            return Err(StorageError::EmptyField("url"));
        }
        if alias.is_empty() {
            return Err(StorageError::EmptyField("alias"));
        }

        let result = sqlx::query("INSERT INTO url (url, alias) VALUES (?, ?)")
            .bind(url)
            .bind(alias)
            .execute(self.pool.as_ref())
            .await;

        match result {
            Ok(done) => Ok(done.last_insert_rowid()),
            Err(e) if is_unique_violation(&e) => Err(StorageError::UrlExists),
            Err(e) => Err(StorageError::Database(e)),
        }
    }

    async fn get_url(&self, alias: &str) -> Result<String, StorageError> {
        let url = sqlx::query_scalar::<_, String>("SELECT url FROM url WHERE alias = ?")
            .bind(alias)
            .fetch_optional(self.pool.as_ref())
            .await?;

        url.ok_or(StorageError::UrlNotFound)
    }
}
