//! Handler resolving every request path through the resolution chain.

use axum::{
    extract::State,
    http::Uri,
    response::{IntoResponse, Redirect, Response},
};

use crate::application::chain::ChainOutcome;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a request path to its destination URL.
///
/// # Endpoint
///
/// Any method, any path (router fallback).
///
/// # Request Flow
///
/// 1. Persistent store
/// 2. Static redirect files, in configured order
/// 3. Default page
///
/// # Responses
///
/// - `303 See Other` with `Location` on a hit
/// - `500 Internal Server Error` (`Database error`) if the store fails
/// - the default page otherwise
pub async fn redirect_handler(State(state): State<AppState>, uri: Uri) -> Response {
    state.chain.handle(uri.path()).await.into_response()
}

impl IntoResponse for ChainOutcome {
    fn into_response(self) -> Response {
        match self {
            ChainOutcome::Redirect(url) => Redirect::to(&url).into_response(),
            ChainOutcome::Fault(fault) => AppError::from(fault).into_response(),
            ChainOutcome::Terminal(response) => (response.status, response.body).into_response(),
        }
    }
}
