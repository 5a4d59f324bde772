//! HTTP layer translating requests into chain lookups.
//!
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing

pub mod handlers;
pub mod middleware;
