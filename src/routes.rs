//! Router configuration.
//!
//! Every path, with any method, is answered by the resolution chain. Paths are
//! matched exactly as received: no trailing-slash normalization is applied.

use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;

/// Constructs the application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .fallback(redirect_handler)
        .with_state(state)
        .layer(tracing::layer())
}
