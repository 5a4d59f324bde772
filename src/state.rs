use std::sync::Arc;

use crate::application::chain::ResolutionChain;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<ResolutionChain>,
}

impl AppState {
    pub fn new(chain: Arc<ResolutionChain>) -> Self {
        Self { chain }
    }
}
