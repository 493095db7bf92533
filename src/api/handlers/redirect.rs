//! Handler for short URL redirect.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /r/{code}`
///
/// # Response
///
/// 302 Found with the stored URL in `Location`. The code must match exactly.
///
/// # Errors
///
/// Returns 404 Not Found with `{"error": "Not found"}` if the code doesn't exist
/// or does not decode to UTF-8.
pub async fn redirect_handler(
    code: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let Path(code) = code.map_err(|rejection| {
        AppError::not_found("Not found", json!({ "reason": rejection.body_text() }))
    })?;
    let original_url = state.link_service.resolve(&code).await?;
    let location = location_header(&original_url)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}

/// Builds a `Location` value for a stored URL.
///
/// ASCII URLs are sent exactly as stored. Anything else is sent in its
/// serialized form (punycode host, percent-encoded path).
fn location_header(original_url: &str) -> Result<HeaderValue, AppError> {
    if original_url.is_ascii()
        && let Ok(value) = HeaderValue::from_str(original_url)
    {
        return Ok(value);
    }

    Url::parse(original_url)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or_else(|| {
            AppError::internal(
                "Stored URL cannot be used as a redirect target",
                json!({ "url": original_url }),
            )
        })
}
