//! Handler for the recent links list.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, Uri},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::links::{LinkItem, ListLinksQuery};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_origin::request_origin;

/// Lists recently created links, newest first.
///
/// # Endpoint
///
/// `GET /links?limit=100`
///
/// `limit` is optional (1-100, default 100). A `limit` that is not an integer
/// gives 400 with `{"error": "invalid query"}`.
///
/// # Response
///
/// ```json
/// [
///   {
///     "code": "aZ3k9Qx",
///     "originalUrl": "https://example.com",
///     "createdAt": "2026-01-01T12:00:00Z",
///     "short": "https://sho.rt/r/aZ3k9Qx"
///   }
/// ]
/// ```
pub async fn links_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    query: Result<Query<ListLinksQuery>, QueryRejection>,
) -> Result<Json<Vec<LinkItem>>, AppError> {
    let Query(query) = query.map_err(|rejection| {
        AppError::bad_request("invalid query", json!({ "reason": rejection.body_text() }))
    })?;
    query.validate()?;

    let origin = request_origin(&headers, &uri, state.behind_proxy);
    let links = state
        .link_service
        .list_recent(query.limit(), origin.as_deref())
        .await?;

    Ok(Json(links.into_iter().map(LinkItem::from).collect()))
}
