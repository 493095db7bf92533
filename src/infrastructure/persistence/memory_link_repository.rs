//! In-process link repository.
//!
//! Keeps links in memory for the lifetime of the process. Used with
//! `STORAGE_BACKEND=memory` and by the HTTP integration tests.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    /// Links in insertion order; `id` is the 1-based position.
    links: Vec<Link>,
    by_code: HashMap<String, usize>,
}

/// Link repository backed by a `Vec` plus a code index behind one lock.
///
/// The uniqueness check and the insert happen under the same write guard, so
/// concurrent creates with the same code cannot both succeed.
#[derive(Default)]
pub struct MemoryLinkRepository {
    inner: RwLock<Inner>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        debug!("Using in-memory link store");
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut inner = self.inner.write().await;

        if inner.by_code.contains_key(&new_link.code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_code_key", "code": new_link.code }),
            ));
        }

        let link = Link::new(
            inner.links.len() as i64 + 1,
            new_link.code,
            new_link.original_url,
            new_link.created_at,
        );

        let index = inner.links.len();
        inner.by_code.insert(link.code.clone(), index);
        inner.links.push(link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let inner = self.inner.read().await;

        Ok(inner
            .by_code
            .get(code)
            .and_then(|&index| inner.links.get(index))
            .cloned())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Link>, AppError> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let inner = self.inner.read().await;

        let mut links: Vec<Link> = inner.links.clone();
        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        links.truncate(limit);

        Ok(links)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.inner.read().await.links.len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
