//! DTOs for the recent links endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::DEFAULT_LIST_LIMIT;
use crate::domain::entities::ShortLink;

/// Query parameters for `GET /links`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListLinksQuery {
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<i64>,
}

impl ListLinksQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT)
    }
}

/// One entry of the recent links list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkItem {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub short: String,
}

impl From<ShortLink> for LinkItem {
    fn from(link: ShortLink) -> Self {
        Self {
            code: link.code,
            original_url: link.original_url,
            created_at: link.created_at,
            short: link.short_url,
        }
    }
}
