//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{ShortcutPolicy, UrlService};
use crate::domain::repositories::UrlRepository;
use crate::utils::short_url::ShortUrlBuilder;

/// Handler state. Cloning is cheap: everything sits behind an [`Arc`].
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<dyn UrlRepository>>,
}

impl AppState {
    /// Builds the state around a record store.
    ///
    /// The store is type-erased so the server can pick PostgreSQL or the
    /// in-memory backend at runtime.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        policy: ShortcutPolicy,
        links: ShortUrlBuilder,
    ) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(repository, policy, links)),
        }
    }

    pub fn links(&self) -> &ShortUrlBuilder {
        self.url_service.links()
    }
}
