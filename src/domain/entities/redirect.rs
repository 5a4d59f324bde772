//! Redirect entities: a single path→URL record and the in-memory table built from them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// A mapping from a request path to its destination URL.
///
/// The URL is stored as-is; it is never validated or normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRecord {
    pub path: String,
    pub url: String,
}

impl RedirectRecord {
    /// Creates a new redirect record.
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}

/// Returned by [`RedirectTable::build`] when a path appears more than once.
///
/// Carries the first path found to repeat.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicated path {0:?}, path has already got assigned url")]
pub struct DuplicatePathError(pub String);

/// Immutable path→URL lookup table.
///
/// Lookups are exact and case-sensitive: `/a`, `/a/` and `/A` are three different keys.
#[derive(Debug, Clone, Default)]
pub struct RedirectTable {
    entries: HashMap<String, String>,
}

impl RedirectTable {
    /// Builds a table from records in input order.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicatePathError`] for the first path that repeats. No table is produced.
    pub fn build(records: Vec<RedirectRecord>) -> Result<Self, DuplicatePathError> {
        let mut entries = HashMap::with_capacity(records.len());

        for record in records {
            match entries.entry(record.path) {
                Entry::Occupied(occupied) => {
                    return Err(DuplicatePathError(occupied.key().clone()));
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(record.url);
                }
            }
        }

        Ok(Self { entries })
    }

    /// Returns the URL assigned to `path`, if any.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_lookup() {
        let table = RedirectTable::build(vec![
            RedirectRecord::new("/a", "http://x"),
            RedirectRecord::new("/b", "http://y"),
        ])
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("/a"), Some("http://x"));
        assert_eq!(table.get("/b"), Some("http://y"));
        assert_eq!(table.get("/c"), None);
    }

    #[test]
    fn test_build_rejects_duplicate_path() {
        let result = RedirectTable::build(vec![
            RedirectRecord::new("/a", "http://x"),
            RedirectRecord::new("/a", "http://z"),
        ]);

        assert_eq!(result.unwrap_err(), DuplicatePathError("/a".to_string()));
    }

    #[test]
    fn test_build_reports_first_duplicate() {
        let result = RedirectTable::build(vec![
            RedirectRecord::new("/one", "http://1"),
            RedirectRecord::new("/two", "http://2"),
            RedirectRecord::new("/two", "http://2b"),
            RedirectRecord::new("/one", "http://1b"),
        ]);

        assert_eq!(result.unwrap_err().0, "/two");
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = RedirectTable::build(vec![RedirectRecord::new("/Docs", "http://docs")]).unwrap();

        assert_eq!(table.get("/Docs"), Some("http://docs"));
        assert_eq!(table.get("/docs"), None);
        assert_eq!(table.get("/Docs/"), None);
    }

    #[test]
    fn test_empty_table() {
        let table = RedirectTable::build(Vec::new()).unwrap();

        assert!(table.is_empty());
        assert_eq!(table.get("/"), None);
    }

    #[test]
    fn test_duplicate_error_message() {
        let err = DuplicatePathError("/urlshort".to_string());
        assert_eq!(
            err.to_string(),
            "duplicated path \"/urlshort\", path has already got assigned url"
        );
    }
}
