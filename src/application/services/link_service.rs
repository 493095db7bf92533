//! Link creation and retrieval service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code_with_length};
use crate::utils::url_normalizer::normalize_url;

/// Maximum number of links returned by [`LinkService::list_recent`].
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Insert attempts per create when none is configured.
pub const DEFAULT_MAX_CODE_ATTEMPTS: usize = 3;

/// Tunables for [`LinkService`].
#[derive(Debug, Clone)]
pub struct LinkSettings {
    /// Base for short URLs. When `None`, the request origin is used.
    pub base_url: Option<String>,
    pub code_length: usize,
    /// Total insert attempts per create, each with a fresh code.
    pub max_code_attempts: usize,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            code_length: DEFAULT_CODE_LENGTH,
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
        }
    }
}

/// Service for creating, resolving and listing short links.
///
/// Stateless between calls; the repository handle is injected so the service
/// runs unchanged against PostgreSQL, the memory store or a mock.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    settings: LinkSettings,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, settings: LinkSettings) -> Self {
        Self {
            link_repository,
            settings,
        }
    }

    /// Creates a short link for `raw_url`.
    ///
    /// # Flow
    ///
    /// 1. Reject an empty URL
    /// 2. Normalize (prefix `https://` to bare hosts)
    /// 3. Resolve the short URL base (configured, else `request_origin`)
    /// 4. Insert with a random code, retrying on code collision
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - URL is empty (`url is required`)
    /// - URL cannot be normalized (`invalid url`)
    /// - No base URL is configured and the request origin is unknown
    ///
    /// Returns [`AppError::Internal`] if every attempt collided or the store failed.
    pub async fn create(
        &self,
        raw_url: &str,
        request_origin: Option<&str>,
    ) -> Result<ShortLink, AppError> {
        if raw_url.is_empty() {
            return Err(AppError::bad_request("url is required", json!({})));
        }

        let original_url = normalize_url(raw_url).map_err(|e| {
            AppError::bad_request(e.to_string(), json!({ "url": raw_url }))
        })?;

        let base = self.base_url(request_origin)?;

        for attempt in 1..=self.settings.max_code_attempts {
            let new_link = NewLink {
                code: generate_code_with_length(self.settings.code_length),
                original_url: original_url.clone(),
                created_at: Utc::now(),
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    info!(code = %link.code, "Short link created");
                    return Ok(link.into_short_link(&base));
                }
                Err(AppError::Conflict { details, .. }) => {
                    warn!(attempt, details = %details, "Short code collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "failed to allocate a unique code",
            json!({ "attempts": self.settings.max_code_attempts }),
        ))
    }

    /// Resolves a code to its original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has exactly this code.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Not found", json!({ "code": code })))?;

        debug!(code, "Resolved short link");
        Ok(link.original_url)
    }

    /// Lists up to `limit` links, newest first, each with its short URL.
    ///
    /// `limit` is clamped to `1..=`[`DEFAULT_LIST_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if no base URL is configured and the
    /// request origin is unknown.
    pub async fn list_recent(
        &self,
        limit: i64,
        request_origin: Option<&str>,
    ) -> Result<Vec<ShortLink>, AppError> {
        let base = self.base_url(request_origin)?;
        let limit = limit.clamp(1, DEFAULT_LIST_LIMIT);

        let links = self.link_repository.list_recent(limit).await?;
        debug!(count = links.len(), limit, "Listed recent links");

        Ok(links
            .into_iter()
            .map(|link| link.into_short_link(&base))
            .collect())
    }

    /// Checks that the underlying store is reachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    /// Picks the base for short URLs: configured value first, then the request origin.
    fn base_url(&self, request_origin: Option<&str>) -> Result<String, AppError> {
        self.settings
            .base_url
            .as_deref()
            .or(request_origin)
            .map(str::to_string)
            .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Link;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Duration;
    use mockall::Sequence;

    fn settings(base_url: Option<&str>) -> LinkSettings {
        LinkSettings {
            base_url: base_url.map(str::to_string),
            ..LinkSettings::default()
        }
    }

    fn stored(new_link: NewLink) -> Link {
        Link::new(1, new_link.code, new_link.original_url, new_link.created_at)
    }

    #[tokio::test]
    async fn test_create_success() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .withf(|l| l.original_url == "https://example.com" && l.code.len() == 7)
            .times(1)
            .returning(|l| Ok(stored(l)));

        let service = LinkService::new(Arc::new(mock_repo), settings(Some("https://sho.rt/")));

        let link = service.create("https://example.com", None).await.unwrap();

        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.short_url, format!("https://sho.rt/r/{}", link.code));
    }

    #[tokio::test]
    async fn test_create_normalizes_bare_host() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .withf(|l| l.original_url == "https://example.com")
            .times(1)
            .returning(|l| Ok(stored(l)));

        let service = LinkService::new(Arc::new(mock_repo), settings(Some("https://sho.rt")));

        let link = service.create("example.com", None).await.unwrap();
        assert_eq!(link.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_create_uses_request_origin_without_base() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|l| Ok(stored(l)));

        let service = LinkService::new(Arc::new(mock_repo), settings(None));

        let link = service
            .create("https://example.com", Some("http://localhost:4000"))
            .await
            .unwrap();

        assert!(link.short_url.starts_with("http://localhost:4000/r/"));
    }

    #[tokio::test]
    async fn test_configured_base_wins_over_origin() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|l| Ok(stored(l)));

        let service = LinkService::new(Arc::new(mock_repo), settings(Some("https://sho.rt")));

        let link = service
            .create("https://example.com", Some("http://internal:4000"))
            .await
            .unwrap();

        assert!(link.short_url.starts_with("https://sho.rt/r/"));
    }

    #[tokio::test]
    async fn test_create_without_any_base_fails_before_insert() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo), settings(None));

        let err = service.create("https://example.com", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_empty_url() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo), settings(Some("https://sho.rt")));

        let err = service.create("", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "url is required");
    }

    #[tokio::test]
    async fn test_create_invalid_url() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo), settings(Some("https://sho.rt")));

        let err = service.create("   ", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "invalid url");
    }

    #[tokio::test]
    async fn test_create_retries_on_code_collision() {
        let mut mock_repo = MockLinkRepository::new();
        let mut seq = Sequence::new();

        mock_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(AppError::conflict(
                    "Unique constraint violation",
                    json!({ "constraint": "links_code_key" }),
                ))
            });
        mock_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|l| Ok(stored(l)));

        let service = LinkService::new(Arc::new(mock_repo), settings(Some("https://sho.rt")));

        let link = service.create("https://example.com", None).await.unwrap();
        assert_eq!(link.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_create_gives_up_after_max_attempts() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .times(DEFAULT_MAX_CODE_ATTEMPTS)
            .returning(|_| Err(AppError::conflict("Unique constraint violation", json!({}))));

        let service = LinkService::new(Arc::new(mock_repo), settings(Some("https://sho.rt")));

        let err = service.create("https://example.com", None).await.unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_create_does_not_retry_store_failure() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = LinkService::new(Arc::new(mock_repo), settings(Some("https://sho.rt")));

        let err = service.create("https://example.com", None).await.unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_create_uses_configured_code_length() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .withf(|l| l.code.len() == 12)
            .times(1)
            .returning(|l| Ok(stored(l)));

        let service = LinkService::new(
            Arc::new(mock_repo),
            LinkSettings {
                base_url: Some("https://sho.rt".to_string()),
                code_length: 12,
                max_code_attempts: 1,
            },
        );

        let link = service.create("https://example.com", None).await.unwrap();
        assert_eq!(link.code.len(), 12);
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "abc1234")
            .times(1)
            .returning(|code| {
                Ok(Some(Link::new(
                    3,
                    code.to_string(),
                    "https://example.com/target".to_string(),
                    Utc::now(),
                )))
            });

        let service = LinkService::new(Arc::new(mock_repo), settings(None));

        assert_eq!(
            service.resolve("abc1234").await.unwrap(),
            "https://example.com/target"
        );
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_repo), settings(None));

        let err = service.resolve("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "Not found");
    }

    #[tokio::test]
    async fn test_list_recent_builds_short_urls() {
        let mut mock_repo = MockLinkRepository::new();
        let now = Utc::now();
        mock_repo
            .expect_list_recent()
            .withf(|limit| *limit == DEFAULT_LIST_LIMIT)
            .times(1)
            .returning(move |_| {
                Ok(vec![
                    Link::new(2, "bbbbbbb".to_string(), "https://2.com".to_string(), now),
                    Link::new(
                        1,
                        "aaaaaaa".to_string(),
                        "https://1.com".to_string(),
                        now - Duration::seconds(5),
                    ),
                ])
            });

        let service = LinkService::new(Arc::new(mock_repo), settings(Some("https://sho.rt")));

        let links = service.list_recent(DEFAULT_LIST_LIMIT, None).await.unwrap();

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].short_url, "https://sho.rt/r/bbbbbbb");
        assert_eq!(links[1].short_url, "https://sho.rt/r/aaaaaaa");
    }

    #[tokio::test]
    async fn test_list_recent_clamps_limit() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_list_recent()
            .withf(|limit| *limit == DEFAULT_LIST_LIMIT)
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = LinkService::new(Arc::new(mock_repo), settings(Some("https://sho.rt")));

        let links = service.list_recent(10_000, None).await.unwrap();
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn test_health_check_delegates_to_store() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_ping().times(1).returning(|| Ok(()));

        let service = LinkService::new(Arc::new(mock_repo), settings(None));

        assert!(service.health_check().await.is_ok());
    }
}
