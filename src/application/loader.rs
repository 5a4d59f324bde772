//! Decoding of redirect mapping files.
//!
//! Both formats describe a sequence of `{path, url}` objects:
//!
//! ```yaml
//! - path: /some-path
//!   url: https://www.some-url.com/demo
//! ```
//!
//! ```json
//! [{ "path": "/some-path", "url": "https://www.some-url.com/demo" }]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::{DuplicatePathError, RedirectRecord, RedirectTable};

/// Structured data format of a redirect mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Detects the format from a file extension (`.yaml`, `.yml` or `.json`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;

        if extension.eq_ignore_ascii_case("yaml") || extension.eq_ignore_ascii_case("yml") {
            Some(Self::Yaml)
        } else if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// Input that is not a sequence of `{path, url}` objects.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid YAML redirects: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON redirects: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading a redirect file from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported redirect file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("{}: {source}", path.display())]
    Decode { path: PathBuf, source: DecodeError },

    #[error("{}: {source}", path.display())]
    Duplicate {
        path: PathBuf,
        source: DuplicatePathError,
    },
}

/// Decodes `bytes` into redirect records, preserving input order.
///
/// # Errors
///
/// Returns [`DecodeError`] if the input does not parse as a sequence of objects
/// with string `path` and `url` fields.
pub fn decode(bytes: &[u8], format: Format) -> Result<Vec<RedirectRecord>, DecodeError> {
    let records = match format {
        Format::Yaml => serde_yaml::from_slice(bytes)?,
        Format::Json => serde_json::from_slice(bytes)?,
    };

    Ok(records)
}

/// Reads and decodes a redirect file, picking the format from its extension.
pub fn load_records(path: &Path) -> Result<Vec<RedirectRecord>, LoadError> {
    let format =
        Format::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;

    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    decode(&bytes, format).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a redirect file and builds a duplicate-free [`RedirectTable`] from it.
pub fn load_table(path: &Path) -> Result<RedirectTable, LoadError> {
    let records = load_records(path)?;

    RedirectTable::build(records).map_err(|source| LoadError::Duplicate {
        path: path.to_path_buf(),
        source,
    })
}
