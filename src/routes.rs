//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`  - Create a short link
//! - `GET  /r/{code}` - Short link redirect
//! - `GET  /links`    - Recent links
//! - `GET  /health`   - Store connectivity check
//! - everything else  - Web UI from `STATIC_DIR` (when configured)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive, for a UI hosted elsewhere
//! - **Path normalization** - Trailing slash handling

use std::path::Path;

use crate::api;
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `static_dir` - directory with the web UI; unknown paths fall back to its
///   `index.html`. API routes always take precedence.
pub fn app_router(state: AppState, static_dir: Option<&str>) -> NormalizePath<Router> {
    let mut router = api::routes::routes().with_state(state);

    if let Some(dir) = static_dir {
        let index = Path::new(dir).join("index.html");
        router = router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    let router = router.layer(cors::layer()).layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
