#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use std::sync::Arc;
use snaplink::api::routes::routes;
use snaplink::application::services::{LinkService, LinkSettings};
use snaplink::domain::repositories::LinkRepository;
use snaplink::infrastructure::persistence::MemoryLinkRepository;
use snaplink::state::AppState;

pub const TEST_BASE_URL: &str = "https://sho.rt";

pub fn create_test_state(base_url: Option<&str>) -> AppState {
    create_state_with_repository(Arc::new(MemoryLinkRepository::new()), base_url)
}

pub fn create_state_with_repository(
    repository: Arc<dyn LinkRepository>,
    base_url: Option<&str>,
) -> AppState {
    let settings = LinkSettings {
        base_url: base_url.map(str::to_string),
        ..LinkSettings::default()
    };

    AppState::new(Arc::new(LinkService::new(repository, settings)), false)
}

pub fn app(state: AppState) -> Router {
    routes().with_state(state)
}

pub fn make_server() -> TestServer {
    TestServer::new(app(create_test_state(Some(TEST_BASE_URL)))).unwrap()
}
