//! In-memory implementation of the shortened URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewShortenedUrl, ShortenedUrl, UsageSummary};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// DashMap-backed store with the same atomicity contract as PostgreSQL.
///
/// Uniqueness is enforced through the entry API and usage updates mutate the
/// record while holding its shard lock, so concurrent hits are never lost.
/// Used for local development (`STORAGE_BACKEND=memory`) and tests.
#[derive(Debug)]
pub struct InMemoryUrlRepository {
    storage: DashMap<String, ShortenedUrl>,
    next_id: AtomicI64,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    fn matching(&self, search: Option<&str>) -> Vec<ShortenedUrl> {
        let needle = search.map(str::to_lowercase);
        self.storage
            .iter()
            .filter(|entry| match &needle {
                Some(n) => {
                    entry.shortcut.to_lowercase().contains(n)
                        || entry.original.to_lowercase().contains(n)
                }
                None => true,
            })
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl Default for InMemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn exists(&self, shortcut: &str) -> Result<bool, AppError> {
        Ok(self.storage.contains_key(shortcut))
    }

    async fn create(&self, new_url: NewShortenedUrl) -> Result<ShortenedUrl, AppError> {
        match self.storage.entry(new_url.shortcut.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "shortened_urls_shortcut_key" }),
            )),
            Entry::Vacant(slot) => {
                let url = ShortenedUrl::new(
                    self.next_id.fetch_add(1, Ordering::Relaxed),
                    new_url.original,
                    new_url.shortcut,
                    new_url.created,
                    None,
                    0,
                );
                slot.insert(url.clone());
                Ok(url)
            }
        }
    }

    async fn find_by_shortcut(&self, shortcut: &str) -> Result<Option<ShortenedUrl>, AppError> {
        Ok(self.storage.get(shortcut).map(|entry| entry.value().clone()))
    }

    async fn record_usage(
        &self,
        shortcut: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ShortenedUrl>, AppError> {
        let Some(mut entry) = self.storage.get_mut(shortcut) else {
            return Ok(None);
        };

        entry.use_count += 1;
        entry.last_accessed = Some(entry.last_accessed.map_or(now, |last| last.max(now)));

        Ok(Some(entry.value().clone()))
    }

    async fn list(
        &self,
        search: Option<String>,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<ShortenedUrl>, AppError> {
        let mut urls = self.matching(search.as_deref());
        urls.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));

        let offset = (page - 1).saturating_mul(page_size).max(0) as usize;
        Ok(urls
            .into_iter()
            .skip(offset)
            .take(page_size.max(0) as usize)
            .collect())
    }

    async fn count(&self, search: Option<String>) -> Result<i64, AppError> {
        Ok(self.matching(search.as_deref()).len() as i64)
    }

    async fn usage_summary(&self) -> Result<UsageSummary, AppError> {
        let (urls, total_uses) = self
            .storage
            .iter()
            .fold((0i64, 0i64), |(count, uses), entry| {
                (count + 1, uses + entry.use_count)
            });

        Ok(UsageSummary { urls, total_uses })
    }

    async fn delete(&self, shortcut: &str) -> Result<bool, AppError> {
        Ok(self.storage.remove(shortcut).is_some())
    }
}
