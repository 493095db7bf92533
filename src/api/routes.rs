//! API route configuration.

use crate::api::handlers::{health_handler, links_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public routes.
///
/// # Endpoints
///
/// - `POST /shorten`   - Create a short link
/// - `GET  /r/{code}`  - Redirect to the original URL
/// - `GET  /links`     - Recently created links, newest first
/// - `GET  /health`    - Store connectivity check
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/r/{code}", get(redirect_handler))
        .route("/links", get(links_handler))
        .route("/health", get(health_handler))
}
