//! Redirect resolvers: the stages a [`crate::application::chain::ResolutionChain`] consults.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::RedirectTable;
use crate::domain::repositories::RedirectRepository;
use crate::error::StorageFault;

/// Outcome of a single resolver lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path maps to this URL.
    Hit(String),
    /// The path is unknown to this resolver; the next stage should be asked.
    Miss,
}

/// A single lookup stage.
///
/// `Err` is reserved for store failures and must never stand in for a miss.
#[async_trait]
pub trait RedirectResolver: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    async fn resolve(&self, path: &str) -> Result<Resolution, StorageFault>;
}

/// Resolves paths against a table loaded at startup.
pub struct StaticResolver {
    name: String,
    table: RedirectTable,
}

impl StaticResolver {
    pub fn new(name: impl Into<String>, table: RedirectTable) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }

    pub fn table(&self) -> &RedirectTable {
        &self.table
    }
}

#[async_trait]
impl RedirectResolver for StaticResolver {
    fn name(&self) -> &str {
        &self.name
    }

    async fn resolve(&self, path: &str) -> Result<Resolution, StorageFault> {
        Ok(match self.table.get(path) {
            Some(url) => Resolution::Hit(url.to_string()),
            None => Resolution::Miss,
        })
    }
}

/// Resolves paths against the persistent record store.
pub struct PersistentResolver<R: RedirectRepository> {
    repository: Arc<R>,
}

impl<R: RedirectRepository> PersistentResolver<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: RedirectRepository> RedirectResolver for PersistentResolver<R> {
    fn name(&self) -> &str {
        "store"
    }

    async fn resolve(&self, path: &str) -> Result<Resolution, StorageFault> {
        match self.repository.find_url(path).await? {
            Some(url) => Ok(Resolution::Hit(url)),
            None => {
                debug!("Path {} not found in store", path);
                Ok(Resolution::Miss)
            }
        }
    }
}
