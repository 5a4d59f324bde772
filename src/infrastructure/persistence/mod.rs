//! redb repository implementations.
//!
//! - [`RedbRedirectRepository`] - Redirect storage and retrieval

pub mod redb_redirect_repository;

pub use redb_redirect_repository::{REDIRECTS, RedbRedirectRepository};
