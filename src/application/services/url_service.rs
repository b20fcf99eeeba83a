//! Url saving and lookup service.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlStore;
use crate::error::StorageError;
use crate::utils::alias_generator::AliasGenerator;

/// Service for saving and resolving aliases.
///
/// Fills in a generated alias when the caller has none and bounds every
/// storage call by `storage_timeout`.
pub struct UrlService {
    store: Arc<dyn UrlStore>,
    generator: AliasGenerator,
    storage_timeout: Duration,
}

impl UrlService {
    /// Creates a new url service.
    pub fn new(
        store: Arc<dyn UrlStore>,
        generator: AliasGenerator,
        storage_timeout: Duration,
    ) -> Self {
        Self {
            store,
            generator,
            storage_timeout,
        }
    }

    /// Saves `url` under `alias`, or under a generated alias when `alias` is
    /// `None` or empty.
    ///
    /// A generated alias that collides with an existing one is reported as
    /// [`StorageError::UrlExists`] like any other duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::UrlExists`] if the alias is taken,
    /// [`StorageError::Timeout`] if storage does not answer in time, or any
    /// other storage error unchanged.
    pub async fn save(&self, url: &str, alias: Option<String>) -> Result<UrlRecord, StorageError> {
        let alias = match alias.filter(|a| !a.is_empty()) {
            Some(alias) => alias,
            None => self.generator.generate(),
        };

        let id = self
            .with_deadline(self.store.save_url(url, &alias))
            .await?;

        Ok(UrlRecord::new(id, alias, url.to_string()))
    }

    /// Resolves `alias` to the stored URL.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::UrlNotFound`] if nothing is stored under
    /// `alias`, [`StorageError::Timeout`] if storage does not answer in time,
    /// or any other storage error unchanged.
    pub async fn resolve(&self, alias: &str) -> Result<String, StorageError> {
        self.with_deadline(self.store.get_url(alias)).await
    }

    async fn with_deadline<T>(
        &self,
        operation: impl Future<Output = Result<T, StorageError>>,
    ) -> Result<T, StorageError> {
        tokio::time::timeout(self.storage_timeout, operation)
            .await
            .map_err(|_| StorageError::Timeout(self.storage_timeout))?
    }
}
