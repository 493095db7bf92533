//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// Link service over whichever store was configured at startup.
pub type DynLinkService = LinkService<dyn LinkRepository>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    /// Trust `X-Forwarded-*` headers when building the request origin.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(link_service: Arc<DynLinkService>, behind_proxy: bool) -> Self {
        Self {
            link_service,
            behind_proxy,
        }
    }
}
