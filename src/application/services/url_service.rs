//! Shortened URL creation, lookup and resolution service.

use std::sync::Arc;
use std::time::Duration;

use chrono::{SubsecRound, Utc};
use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{info, warn};

use crate::application::services::shortcut_generator::{ShortcutGenerator, ShortcutPolicy};
use crate::application::services::usage_recorder::UsageRecorder;
use crate::domain::entities::{NewShortenedUrl, ShortenedUrl, UsageSummary};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::short_url::ShortUrlBuilder;
use crate::utils::slug::{RandomSlugs, SlugSource};
use crate::utils::url_validation::validate_original_url;

/// Extra insert attempts after a shortcut was taken between check and insert.
pub const INSERT_RETRIES: usize = 3;

/// Largest page the listing operations return.
pub const MAX_PAGE_SIZE: i64 = 1000;

/// Pause before regenerating after an insert race.
const INSERT_RETRY_DELAY: Duration = Duration::from_millis(10);

/// Service for creating, retrieving and resolving shortened URLs.
///
/// Glues the [`ShortcutGenerator`] and [`UsageRecorder`] to the record store
/// and owns the rules the HTTP layer and the admin CLI share.
pub struct UrlService<R: UrlRepository + ?Sized, S: SlugSource = RandomSlugs> {
    repository: Arc<R>,
    generator: ShortcutGenerator<R, S>,
    recorder: UsageRecorder<R>,
    links: ShortUrlBuilder,
}

impl<R: UrlRepository + ?Sized> UrlService<R> {
    /// Creates a new URL service with a random shortcut generator.
    pub fn new(repository: Arc<R>, policy: ShortcutPolicy, links: ShortUrlBuilder) -> Self {
        let generator = ShortcutGenerator::new(repository.clone(), policy);
        Self::with_generator(repository, generator, links)
    }
}

impl<R: UrlRepository + ?Sized, S: SlugSource> UrlService<R, S> {
    /// Creates a new URL service around an existing generator.
    pub fn with_generator(
        repository: Arc<R>,
        generator: ShortcutGenerator<R, S>,
        links: ShortUrlBuilder,
    ) -> Self {
        Self {
            recorder: UsageRecorder::new(repository.clone()),
            repository,
            generator,
            links,
        }
    }

    pub fn policy(&self) -> &ShortcutPolicy {
        self.generator.policy()
    }

    pub fn links(&self) -> &ShortUrlBuilder {
        &self.links
    }

    /// Creates a shortened URL for `original`.
    ///
    /// # Insert races
    ///
    /// The generator holds no lock between its existence check and the
    /// insert. If another writer takes the shortcut first the store reports a
    /// conflict and a fresh shortcut is generated, at most
    /// [`INSERT_RETRIES`] more times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `original` is not an absolute URL;
    /// nothing is generated in that case.
    /// Returns [`AppError::Internal`] if no free shortcut could be found.
    /// Returns [`AppError::Conflict`] if every insert attempt lost a race.
    pub async fn create(&self, original: String) -> Result<ShortenedUrl, AppError> {
        validate_original_url(&original).map_err(|e| {
            AppError::bad_request(
                "Invalid URL",
                json!({ "url": ["Enter a valid URL."], "reason": e.to_string() }),
            )
        })?;

        let this = self;
        let original = original.as_str();
        let strategy = FixedInterval::new(INSERT_RETRY_DELAY).take(INSERT_RETRIES);

        let url = RetryIf::start(
            strategy,
            move || this.create_once(original),
            |e: &AppError| {
                if e.is_conflict() {
                    warn!("Shortcut taken before insert, regenerating");
                    true
                } else {
                    false
                }
            },
        )
        .await?;

        info!(shortcut = %url.shortcut, "Created shortened URL");
        Ok(url)
    }

    async fn create_once(&self, original: &str) -> Result<ShortenedUrl, AppError> {
        let shortcut = self.generator.generate().await?;

        let new_url = NewShortenedUrl {
            original: original.to_string(),
            shortcut,
            created: Utc::now().trunc_subsecs(6),
        };

        self.repository.create(new_url).await
    }

    /// Retrieves a record by shortcut without recording usage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this shortcut.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get(&self, shortcut: &str) -> Result<ShortenedUrl, AppError> {
        self.repository
            .find_by_shortcut(shortcut)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Shortcut not found", json!({ "shortcut": shortcut }))
            })
    }

    /// Resolves a shortcut to its original URL and records the hit.
    ///
    /// # Errors
    ///
    /// See [`UsageRecorder::record_hit`].
    pub async fn resolve(&self, shortcut: &str) -> Result<String, AppError> {
        self.recorder.record_hit(shortcut).await
    }

    /// Full URL a visitor follows for `shortcut`.
    pub fn shortened_url(&self, shortcut: &str) -> String {
        self.links.shortened_url(shortcut)
    }

    /// Lists records newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `page` is below 1, `page_size` is
    /// outside `1..=MAX_PAGE_SIZE`, or the page starts beyond the addressable
    /// range.
    pub async fn list(
        &self,
        search: Option<String>,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<ShortenedUrl>, AppError> {
        if page < 1 || !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(AppError::bad_request(
                format!("Page must be at least 1 and page size between 1 and {MAX_PAGE_SIZE}"),
                json!({ "page": page, "page_size": page_size }),
            ));
        }

        if (page - 1).checked_mul(page_size).is_none() {
            return Err(AppError::bad_request(
                "Page is out of range",
                json!({ "page": page, "page_size": page_size }),
            ));
        }

        let search = search.filter(|s| !s.trim().is_empty());
        self.repository.list(search, page, page_size).await
    }

    pub async fn count(&self, search: Option<String>) -> Result<i64, AppError> {
        let search = search.filter(|s| !s.trim().is_empty());
        self.repository.count(search).await
    }

    pub async fn usage_summary(&self) -> Result<UsageSummary, AppError> {
        self.repository.usage_summary().await
    }

    /// Deletes a record. Only administrative tooling calls this.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this shortcut.
    pub async fn delete(&self, shortcut: &str) -> Result<(), AppError> {
        if self.repository.delete(shortcut).await? {
            info!(shortcut, "Deleted shortened URL");
            Ok(())
        } else {
            Err(AppError::not_found(
                "Shortcut not found",
                json!({ "shortcut": shortcut }),
            ))
        }
    }
}
