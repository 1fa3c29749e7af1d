#![allow(dead_code)]

use axum_test::TestServer;
use chrono::Utc;
use shortcut_service::application::services::ShortcutPolicy;
use shortcut_service::domain::entities::{NewShortenedUrl, ShortenedUrl};
use shortcut_service::domain::repositories::UrlRepository;
use shortcut_service::infrastructure::persistence::InMemoryUrlRepository;
use shortcut_service::routes::router;
use shortcut_service::state::AppState;
use shortcut_service::utils::reserved::ReservedShortcuts;
use shortcut_service::utils::short_url::ShortUrlBuilder;
use std::sync::Arc;

pub const SITE_URL: &str = "http://testserver";

pub fn create_test_state(repository: Arc<InMemoryUrlRepository>, prefix: &str) -> AppState {
    let links = ShortUrlBuilder::parse(SITE_URL, prefix).unwrap();
    let policy = ShortcutPolicy::new(5, 10, ReservedShortcuts::new(Vec::<String>::new()));

    AppState::new(repository, policy, links)
}

/// Test server over a fresh in-memory store, plus a handle on that store.
pub fn create_test_server(prefix: &str) -> (TestServer, Arc<InMemoryUrlRepository>) {
    let repository = Arc::new(InMemoryUrlRepository::new());
    let state = create_test_state(repository.clone(), prefix);

    let server = TestServer::new(router(state)).unwrap();
    (server, repository)
}

pub async fn create_test_url(
    repository: &InMemoryUrlRepository,
    shortcut: &str,
    original: &str,
) -> ShortenedUrl {
    repository
        .create(NewShortenedUrl {
            original: original.to_string(),
            shortcut: shortcut.to_string(),
            created: Utc::now(),
        })
        .await
        .unwrap()
}

pub async fn get_test_url(repository: &InMemoryUrlRepository, shortcut: &str) -> ShortenedUrl {
    repository
        .find_by_shortcut(shortcut)
        .await
        .unwrap()
        .unwrap()
}
