#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use url_redirector::application::chain::{DefaultPage, ResolutionChain};
use url_redirector::application::resolver::{PersistentResolver, StaticResolver};
use url_redirector::domain::entities::{RedirectRecord, RedirectTable};
use url_redirector::domain::repositories::RedirectRepository;
use url_redirector::infrastructure::persistence::RedbRedirectRepository;
use url_redirector::state::AppState;

pub const FALLBACK_BODY: &str = "Fallback handler called";

/// Opens a fresh redirect store in a temporary directory.
///
/// The directory must outlive the repository.
pub fn create_test_repository() -> (TempDir, Arc<RedbRedirectRepository>) {
    let dir = tempfile::tempdir().unwrap();
    let repo = RedbRedirectRepository::open(dir.path().join("test.db")).unwrap();
    (dir, Arc::new(repo))
}

/// Repository over a database whose redirect table was never created.
pub fn create_uninitialized_repository() -> (TempDir, Arc<RedbRedirectRepository>) {
    let dir = tempfile::tempdir().unwrap();
    let db = redb::Database::create(dir.path().join("empty.db")).unwrap();
    (dir, Arc::new(RedbRedirectRepository::from_database(db)))
}

pub async fn insert_test_redirect(repo: &RedbRedirectRepository, path: &str, url: &str) {
    repo.insert(RedirectRecord::new(path, url)).await.unwrap();
}

pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Store → static table → fallback page.
pub fn create_test_state(
    repo: Arc<RedbRedirectRepository>,
    static_records: Vec<RedirectRecord>,
) -> AppState {
    let table = RedirectTable::build(static_records).unwrap();

    let chain = ResolutionChain::new(DefaultPage::new(FALLBACK_BODY))
        .with_stage(PersistentResolver::new(repo))
        .with_stage(StaticResolver::new("test-table", table));

    AppState::new(Arc::new(chain))
}
