//! DTOs for shortened URL endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::ShortenedUrl;
use crate::utils::short_url::ShortUrlBuilder;

/// Shape a shortcut path segment must have to be looked up at all.
static SHORTCUT_SEGMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("valid shortcut regex"));

/// Returns true if `segment` could be a stored shortcut.
///
/// Anything else is answered with 404 without touching the store.
pub fn is_shortcut_segment(segment: &str) -> bool {
    SHORTCUT_SEGMENT_REGEX.is_match(segment)
}

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    /// The original URL (must be absolute).
    #[validate(url(message = "Enter a valid URL."))]
    pub url: String,
}

/// A shortened URL with its usage metadata.
///
/// # Example
///
/// ```json
/// {
///   "url": "https://testserver/",
///   "shortcut": "testtest",
///   "created": "2023-09-06T11:19:05.496782Z",
///   "last_accessed": null,
///   "use_count": 0,
///   "shortened_url": "http://localhost:8000/testtest/"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub url: String,
    pub shortcut: String,
    pub created: DateTime<Utc>,
    pub last_accessed: Option<DateTime<Utc>>,
    pub use_count: i64,
    pub shortened_url: String,
}

impl UrlResponse {
    pub fn new(url: ShortenedUrl, links: &ShortUrlBuilder) -> Self {
        let shortened_url = links.shortened_url(&url.shortcut);
        Self {
            url: url.original,
            shortcut: url.shortcut,
            created: url.created,
            last_accessed: url.last_accessed,
            use_count: url.use_count,
            shortened_url,
        }
    }
}
