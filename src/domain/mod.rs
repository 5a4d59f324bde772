//! Domain layer containing redirect entities and repository contracts.
//!
//! - [`entities`] - Redirect records and the in-memory redirect table
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on the HTTP or storage layers; repository
//! traits are implemented by [`crate::infrastructure`].

pub mod entities;
pub mod repositories;
