//! Repository trait for persistent redirect storage.

use crate::domain::entities::RedirectRecord;
use crate::error::StorageFault;
use async_trait::async_trait;

/// Repository interface for redirects kept in the record store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::RedbRedirectRepository`] - redb implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_redirect.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectRepository: Send + Sync {
    /// Looks up the URL stored for `path`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if found
    /// - `Ok(None)` if the key is absent
    ///
    /// # Errors
    ///
    /// Returns [`StorageFault`] if the store fails or the redirect bucket is missing.
    async fn find_url(&self, path: &str) -> Result<Option<String>, StorageFault>;

    /// Stores `record`, replacing any URL already assigned to its path.
    ///
    /// Returns the stored path.
    ///
    /// # Errors
    ///
    /// Returns [`StorageFault::KeyRequired`] for an empty path, or any store failure.
    async fn insert(&self, record: RedirectRecord) -> Result<String, StorageFault>;

    /// Stores all records concurrently, one write transaction each.
    ///
    /// Reports the first failure once every insert has finished. Records written
    /// before the failure stay written.
    async fn insert_all(&self, records: Vec<RedirectRecord>) -> Result<(), StorageFault>;

    /// Lists every stored redirect in key order.
    async fn list(&self) -> Result<Vec<RedirectRecord>, StorageFault>;
}
