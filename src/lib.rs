//! # URL Redirector
//!
//! A path-based URL redirect service built with Axum and redb.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Redirect entities and repository traits
//! - **Application Layer** ([`application`]) - File loading, resolvers and the resolution chain
//! - **Infrastructure Layer** ([`infrastructure`]) - redb-backed persistence
//! - **API Layer** ([`api`]) - HTTP handler and middleware
//!
//! ## Request Flow
//!
//! Every request path goes through a [`application::ResolutionChain`]:
//!
//! 1. Persistent store (redb)
//! 2. Static redirect files (YAML/JSON), in configured order
//! 3. Default page
//!
//! A hit answers `303 See Other`. A store failure answers `500` and never falls
//! through to later stages.
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIRECT_FILES="urls.yaml"
//! export SEED_FILE="initdata.json"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::{AppError, StorageFault};
pub use state::AppState;

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::application::{
        ChainOutcome, DefaultPage, PersistentResolver, RedirectResolver, ResolutionChain,
        Resolution, StaticResolver,
    };
    pub use crate::domain::entities::{DuplicatePathError, RedirectRecord, RedirectTable};
    pub use crate::domain::repositories::RedirectRepository;
    pub use crate::error::{AppError, StorageFault};
    pub use crate::infrastructure::persistence::RedbRedirectRepository;
    pub use crate::state::AppState;
}
