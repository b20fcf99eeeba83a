//! Storage trait for alias → URL records.

use crate::error::StorageError;
use async_trait::async_trait;

/// Storage capability used by the HTTP handlers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteUrlStore`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Saves `url` under `alias` and returns the id of the new record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::UrlExists`] if the alias is already taken.
    /// Returns [`StorageError::EmptyField`] if `url` or `alias` is empty.
    /// Any other variant signals a storage failure.
    async fn save_url(&self, url: &str, alias: &str) -> Result<i64, StorageError>;

    /// Looks up the URL stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::UrlNotFound`] if no record matches.
    /// Any other variant signals a storage failure.
    async fn get_url(&self, alias: &str) -> Result<String, StorageError>;
}
