//! Core domain entities.
//!
//! - [`RedirectRecord`] - A single path→URL mapping
//! - [`RedirectTable`] - Duplicate-free in-memory lookup table built from records

pub mod redirect;

pub use redirect::{DuplicatePathError, RedirectRecord, RedirectTable};
