//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export LISTEN="0.0.0.0:8080"
//! export DB_PATH="urlpath.db"
//! export REDIRECT_FILES="urls.yaml,extra.json"
//! export SEED_FILE="initdata.json"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `DB_PATH` - redb database file (default: `urlpath.db`)
//! - `REDIRECT_FILES` - Comma-separated YAML/JSON redirect files, highest precedence
//!   first (default: `urls.yaml`; an empty value disables static redirects)
//! - `SEED_FILE` - YAML/JSON file bulk-loaded into the database at startup
//! - `FALLBACK_BODY` - Body of the default page (default: `Hello, world!`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::application::loader::Format;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub db_path: PathBuf,
    /// Static redirect files in precedence order.
    pub redirect_files: Vec<PathBuf>,
    /// When set, its records are written to the database before serving.
    pub seed_file: Option<PathBuf>,
    pub fallback_body: String,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            db_path: PathBuf::from("urlpath.db"),
            redirect_files: vec![PathBuf::from("urls.yaml")],
            seed_file: None,
            fallback_body: "Hello, world!".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but not valid unicode.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = env::var("LISTEN").unwrap_or(defaults.listen_addr);
        let db_path = env::var("DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let redirect_files = match env::var("REDIRECT_FILES") {
            Ok(value) => parse_file_list(&value),
            Err(env::VarError::NotPresent) => defaults.redirect_files,
            Err(e) => return Err(e).context("REDIRECT_FILES is not valid unicode"),
        };

        let seed_file = env::var("SEED_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let fallback_body = env::var("FALLBACK_BODY").unwrap_or(defaults.fallback_body);
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        Ok(Self {
            listen_addr,
            db_path,
            redirect_files,
            seed_file,
            fallback_body,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `db_path` is empty
    /// - a redirect or seed file has no `.yaml`, `.yml` or `.json` extension
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.db_path.as_os_str().is_empty() {
            anyhow::bail!("DB_PATH must not be empty");
        }

        for file in self.redirect_files.iter().chain(self.seed_file.iter()) {
            if Format::from_path(file).is_none() {
                anyhow::bail!(
                    "Redirect file '{}' must have a .yaml, .yml or .json extension",
                    file.display()
                );
            }
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.db_path.display());

        if self.redirect_files.is_empty() {
            tracing::info!("  Redirect files: none");
        } else {
            for file in &self.redirect_files {
                tracing::info!("  Redirect file: {}", file.display());
            }
        }

        if let Some(ref seed) = self.seed_file {
            tracing::info!("  Seed file: {}", seed.display());
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_file_list(value: &str) -> Vec<PathBuf> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Loads and validates configuration from environment variables.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
