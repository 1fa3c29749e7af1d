//! Shortened URL entity: a shortcut mapped to an original URL plus usage data.

use chrono::{DateTime, Utc};
use std::fmt;

/// A persisted shortcut → original URL mapping.
///
/// `original`, `shortcut` and `created` never change after insertion.
/// `use_count` and `last_accessed` are only touched by the usage recorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedUrl {
    pub id: i64,
    pub original: String,
    pub shortcut: String,
    pub created: DateTime<Utc>,
    pub last_accessed: Option<DateTime<Utc>>,
    pub use_count: i64,
}

impl ShortenedUrl {
    /// Creates a new ShortenedUrl instance.
    pub fn new(
        id: i64,
        original: String,
        shortcut: String,
        created: DateTime<Utc>,
        last_accessed: Option<DateTime<Utc>>,
        use_count: i64,
    ) -> Self {
        Self {
            id,
            original,
            shortcut,
            created,
            last_accessed,
            use_count,
        }
    }

    /// Returns true if the shortcut has never been resolved.
    pub fn is_unused(&self) -> bool {
        self.use_count == 0 && self.last_accessed.is_none()
    }
}

impl fmt::Display for ShortenedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.shortcut, self.original)
    }
}

/// Input data for inserting a new shortened URL.
#[derive(Debug, Clone)]
pub struct NewShortenedUrl {
    pub original: String,
    pub shortcut: String,
    pub created: DateTime<Utc>,
}

/// Aggregate usage numbers across all records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageSummary {
    pub urls: i64,
    pub total_uses: i64,
}
