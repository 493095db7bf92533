//! Cross-origin access for browser clients.

use tower_http::cors::CorsLayer;

/// Allows any origin, method and header.
///
/// The web UI may be hosted on a different origin than the API, and none of
/// the endpoints rely on cookies.
pub fn layer() -> CorsLayer {
    CorsLayer::permissive()
}
