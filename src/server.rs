//! HTTP server initialization and runtime setup.
//!
//! Opens the redirect store, seeds it, loads static redirect files, assembles the
//! resolution chain and runs the Axum server until shutdown.

use crate::application::chain::{DefaultPage, ResolutionChain};
use crate::application::loader;
use crate::application::resolver::{PersistentResolver, StaticResolver};
use crate::config::Config;
use crate::domain::repositories::RedirectRepository;
use crate::infrastructure::persistence::RedbRedirectRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - redb redirect store
/// - Seed data (if `SEED_FILE` is set)
/// - Static redirect tables
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - The database cannot be opened
/// - Seeding fails
/// - A redirect file is unreadable, malformed or contains a duplicated path
/// - Server bind fails
pub async fn run(config: Config) -> Result<()> {
    let repository = Arc::new(
        RedbRedirectRepository::open(&config.db_path)
            .with_context(|| format!("Failed to open database {}", config.db_path.display()))?,
    );

    if let Some(seed_file) = &config.seed_file {
        seed(repository.as_ref(), seed_file).await?;
    }

    let chain = build_chain(&config, repository)?;
    tracing::info!("Resolution chain: {:?}", chain.stage_names());

    let state = AppState::new(Arc::new(chain));
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down gracefully");

    Ok(())
}

/// Assembles the chain: persistent store, then each redirect file, then the default page.
///
/// # Errors
///
/// Returns an error if a redirect file cannot be loaded.
pub fn build_chain<R: RedirectRepository + 'static>(
    config: &Config,
    repository: Arc<R>,
) -> Result<ResolutionChain> {
    let mut chain = ResolutionChain::new(DefaultPage::new(config.fallback_body.clone()))
        .with_stage(PersistentResolver::new(repository));

    for file in &config.redirect_files {
        let table = loader::load_table(file)?;
        tracing::info!("Loaded {} redirects from {}", table.len(), file.display());
        chain = chain.with_stage(StaticResolver::new(file.display().to_string(), table));
    }

    Ok(chain)
}

/// Bulk-loads a redirect file into the store.
///
/// Records written before a failure are kept.
pub async fn seed<R: RedirectRepository + ?Sized>(repository: &R, seed_file: &Path) -> Result<()> {
    let records = loader::load_records(seed_file)?;
    let count = records.len();

    repository
        .insert_all(records)
        .await
        .with_context(|| format!("Failed to seed database from {}", seed_file.display()))?;

    tracing::info!("Seeded {} redirects from {}", count, seed_file.display());
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down...");
}
