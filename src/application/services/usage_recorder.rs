//! Usage recording for resolved shortcuts.

use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use serde_json::json;
use tracing::debug;

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Records a hit on every successful resolution.
///
/// The counter bump and timestamp are a single store-side update
/// ([`UrlRepository::record_usage`]), so concurrent resolutions of the same
/// shortcut each add exactly one.
pub struct UsageRecorder<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UrlRepository + ?Sized> UsageRecorder<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Resolves `shortcut`, recording the access, and returns the original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the shortcut is unknown; nothing is
    /// modified in that case.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn record_hit(&self, shortcut: &str) -> Result<String, AppError> {
        let url = self
            .repository
            .record_usage(shortcut, Utc::now().trunc_subsecs(6))
            .await?
            .ok_or_else(|| {
                AppError::not_found("Shortcut not found", json!({ "shortcut": shortcut }))
            })?;

        metrics::counter!("shortcut_resolutions_total").increment(1);
        debug!(shortcut, use_count = url.use_count, "Recorded shortcut hit");

        Ok(url.original)
    }
}
