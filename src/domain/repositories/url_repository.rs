//! Repository trait for shortened URL records.

use crate::domain::entities::{NewShortenedUrl, ShortenedUrl, UsageSummary};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Record store for shortcut → URL mappings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - DashMap-backed store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Returns whether a record with exactly this shortcut exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn exists(&self, shortcut: &str) -> Result<bool, AppError>;

    /// Inserts a new record with `use_count = 0` and no `last_accessed`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the shortcut is already taken.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_url: NewShortenedUrl) -> Result<ShortenedUrl, AppError>;

    /// Finds a record by exact shortcut without touching usage data.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_shortcut(&self, shortcut: &str) -> Result<Option<ShortenedUrl>, AppError>;

    /// Atomically bumps `use_count` by one and stamps `last_accessed`.
    ///
    /// Must be a single store-side update so concurrent calls for the same
    /// shortcut never lose an increment. `last_accessed` never moves backwards.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` with the updated record
    /// - `Ok(None)` if no record has this shortcut (nothing is modified)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn record_usage(
        &self,
        shortcut: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ShortenedUrl>, AppError>;

    /// Lists records newest first.
    ///
    /// # Arguments
    ///
    /// - `search` - Optional case-insensitive substring matched against the
    ///   shortcut and the original URL
    /// - `page` - Page number (1-indexed)
    /// - `page_size` - Number of items per page
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list(
        &self,
        search: Option<String>,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<ShortenedUrl>, AppError>;

    /// Counts records, optionally filtered like [`UrlRepository::list`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self, search: Option<String>) -> Result<i64, AppError>;

    /// Returns the number of records and the sum of their use counts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn usage_summary(&self) -> Result<UsageSummary, AppError>;

    /// Deletes a record. Administrative only.
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, shortcut: &str) -> Result<bool, AppError>;
}
