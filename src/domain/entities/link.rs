//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A stored short link.
///
/// Write-once: every field is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, code: String, original_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            original_url,
            created_at,
        }
    }

    /// Attaches the public short URL built from `base`.
    pub fn into_short_link(self, base: &str) -> ShortLink {
        let short_url = short_url(base, &self.code);
        ShortLink {
            code: self.code,
            original_url: self.original_url,
            created_at: self.created_at,
            short_url,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
}

/// A link as presented to clients, with its absolute short URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub short_url: String,
}

/// Joins a base URL and a code into `{base}/r/{code}`.
///
/// A single trailing slash on `base` is dropped.
pub fn short_url(base: &str, code: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    format!("{base}/r/{code}")
}
