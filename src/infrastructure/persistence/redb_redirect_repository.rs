//! redb implementation of the redirect repository.

use async_trait::async_trait;
use redb::{Database, ReadableTable, TableDefinition, TableError};
use std::path::Path;
use std::sync::Arc;
use tokio::task::{self, JoinSet};
use tracing::{debug, info, warn};

use crate::domain::entities::RedirectRecord;
use crate::domain::repositories::RedirectRepository;
use crate::error::StorageFault;

/// Redirects keyed by request path, values are destination URLs.
pub const REDIRECTS: TableDefinition<&str, &str> = TableDefinition::new("redirects");

/// redb repository for redirect storage.
///
/// All redb calls run on the blocking pool. redb allows concurrent readers and
/// serializes write transactions itself.
#[derive(Clone)]
pub struct RedbRedirectRepository {
    db: Arc<Database>,
}

impl RedbRedirectRepository {
    /// Opens (or creates) the database file and makes sure the redirect table exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageFault`] if the file cannot be opened or the table cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageFault> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _t = write_txn.open_table(REDIRECTS)?;
        }
        write_txn.commit()?;

        info!("Opened redirect store at {}", path.display());

        Ok(Self { db: Arc::new(db) })
    }

    /// Wraps an already opened database without creating the redirect table.
    pub fn from_database(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }

    fn find_url_blocking(db: &Database, path: &str) -> Result<Option<String>, StorageFault> {
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(REDIRECTS).map_err(missing_bucket)?;

        Ok(table.get(path)?.map(|url| url.value().to_string()))
    }

    fn insert_blocking(db: &Database, record: &RedirectRecord) -> Result<String, StorageFault> {
        if record.path.is_empty() {
            return Err(StorageFault::KeyRequired);
        }

        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(REDIRECTS)?;
            table.insert(record.path.as_str(), record.url.as_str())?;
        }
        write_txn.commit()?;

        Ok(record.path.clone())
    }

    fn list_blocking(db: &Database) -> Result<Vec<RedirectRecord>, StorageFault> {
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(REDIRECTS).map_err(missing_bucket)?;

        let mut result = Vec::new();
        for entry in table.iter()? {
            let (path, url) = entry?;
            result.push(RedirectRecord::new(path.value(), url.value()));
        }
        Ok(result)
    }
}

/// A read transaction cannot create tables, so an absent table means the store
/// was never initialized.
fn missing_bucket(e: TableError) -> StorageFault {
    match e {
        TableError::TableDoesNotExist(name) => StorageFault::BucketMissing(name),
        other => other.into(),
    }
}

#[async_trait]
impl RedirectRepository for RedbRedirectRepository {
    async fn find_url(&self, path: &str) -> Result<Option<String>, StorageFault> {
        debug!("Looking for path: {}", path);

        let db = Arc::clone(&self.db);
        let path = path.to_string();
        task::spawn_blocking(move || Self::find_url_blocking(&db, &path)).await?
    }

    async fn insert(&self, record: RedirectRecord) -> Result<String, StorageFault> {
        debug!("Inserting {} -> {}", record.path, record.url);

        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || Self::insert_blocking(&db, &record)).await?
    }

    async fn insert_all(&self, records: Vec<RedirectRecord>) -> Result<(), StorageFault> {
        let total = records.len();
        let mut tasks = JoinSet::new();

        for record in records {
            let db = Arc::clone(&self.db);
            tasks.spawn_blocking(move || Self::insert_blocking(&db, &record));
        }

        let mut first_error = None;
        let mut inserted = 0usize;

        while let Some(joined) = tasks.join_next().await {
            match joined.map_err(StorageFault::from).and_then(|result| result) {
                Ok(path) => {
                    inserted += 1;
                    debug!("Successfully inserted {}", path);
                }
                Err(e) if first_error.is_none() => first_error = Some(e),
                Err(e) => warn!("Additional insert failure ignored: {}", e),
            }
        }

        match first_error {
            Some(e) => {
                warn!("Bulk insert failed after {}/{} records: {}", inserted, total, e);
                Err(e)
            }
            None => {
                info!("Inserted {} redirects", inserted);
                Ok(())
            }
        }
    }

    async fn list(&self) -> Result<Vec<RedirectRecord>, StorageFault> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || Self::list_blocking(&db)).await?
    }
}
