//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, Uri},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_origin::request_origin;

/// Creates a short link for one URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "example.com" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short": "https://sho.rt/r/aZ3k9Qx",
///   "code": "aZ3k9Qx",
///   "originalUrl": "https://example.com"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request with `{"error": "url is required"}` for a missing or
/// empty `url`, `{"error": "invalid url"}` if it cannot be normalized, and
/// `{"error": "invalid request body"}` if the body is not a JSON object with a
/// string `url`.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request(
            "invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    payload.validate()?;
    let url = payload.url.unwrap_or_default();

    let origin = request_origin(&headers, &uri, state.behind_proxy);
    let link = state.link_service.create(&url, origin.as_deref()).await?;

    Ok(Json(link.into()))
}
