//! CLI administration tool for url-redirector.
//!
//! Manages the redirect store directly, without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Bulk-load redirects from a YAML or JSON file
//! cargo run --bin admin -- load initdata.json
//!
//! # Add or replace a single redirect
//! cargo run --bin admin -- put /docs https://docs.rs
//!
//! # Look up a redirect
//! cargo run --bin admin -- get /docs
//!
//! # List all stored redirects
//! cargo run --bin admin -- list
//!
//! # Check that the database opens and the redirect table exists
//! cargo run --bin admin -- check
//! ```
//!
//! # Environment Variables
//!
//! - `DB_PATH` (default: `urlpath.db`): redb database file, overridden by `--db`

use url_redirector::application::loader;
use url_redirector::domain::entities::RedirectRecord;
use url_redirector::domain::repositories::RedirectRepository;
use url_redirector::infrastructure::persistence::RedbRedirectRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::path::PathBuf;

/// CLI tool for managing url-redirector.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// redb database file
    #[arg(long, env = "DB_PATH", default_value = "urlpath.db")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bulk-load redirects from a YAML or JSON file
    Load {
        /// File with a sequence of {path, url} objects
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Add or replace a single redirect
    Put { path: String, url: String },

    /// Show the URL stored for a path
    Get { path: String },

    /// List all stored redirects
    List,

    /// Check that the database opens and the redirect table exists
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let repo = RedbRedirectRepository::open(&cli.db)
        .with_context(|| format!("Failed to open database {}", cli.db.display()))?;

    match cli.command {
        Commands::Load { file, yes } => load(&repo, file, yes).await?,
        Commands::Put { path, url } => put(&repo, path, url).await?,
        Commands::Get { path } => get(&repo, &path).await?,
        Commands::List => list(&repo).await?,
        Commands::Check => check(&repo, &cli.db).await?,
    }

    Ok(())
}

/// Loads a redirect file into the store after confirmation.
///
/// Inserts run concurrently; a failure leaves already written records in place.
async fn load(repo: &RedbRedirectRepository, file: PathBuf, skip_confirm: bool) -> Result<()> {
    let records = loader::load_records(&file)?;

    println!(
        "Loading {} redirects from {}",
        records.len().to_string().cyan(),
        file.display().to_string().cyan()
    );

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Write these redirects to the database?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    repo.insert_all(records)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load redirects: {}", e))?;

    println!("{}", "Redirects loaded".green().bold());
    Ok(())
}

async fn put(repo: &RedbRedirectRepository, path: String, url: String) -> Result<()> {
    let inserted = repo
        .insert(RedirectRecord::new(path, url))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to insert redirect: {}", e))?;

    println!("{} {}", "Stored".green(), inserted.cyan());
    Ok(())
}

async fn get(repo: &RedbRedirectRepository, path: &str) -> Result<()> {
    match repo.find_url(path).await? {
        Some(url) => println!("{} -> {}", path.cyan(), url.bright_white()),
        None => println!("{} {}", path.cyan(), "not found".yellow()),
    }
    Ok(())
}

/// Lists stored redirects.
///
/// ```text
///   Path                           URL
///   ─────────────────────────────────────────────────────────
///   /docs                          https://docs.rs
/// ```
async fn list(repo: &RedbRedirectRepository) -> Result<()> {
    let records = repo.list().await?;

    if records.is_empty() {
        println!("{}", "  No redirects stored".yellow());
        return Ok(());
    }

    println!(
        "  {:<30} {}",
        "Path".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(60).bright_black());

    for record in &records {
        println!("  {:<30} {}", record.path.cyan(), record.url);
    }

    println!();
    println!("  Total: {}", records.len().to_string().bright_white().bold());
    Ok(())
}

async fn check(repo: &RedbRedirectRepository, db: &std::path::Path) -> Result<()> {
    let count = repo.list().await?.len();

    println!("{}", "Database OK".green().bold());
    println!("  File:      {}", db.display());
    println!("  Redirects: {}", count);
    Ok(())
}
