//! PostgreSQL implementation of the shortened URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewShortenedUrl, ShortenedUrl, UsageSummary};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

const COLUMNS: &str = "id, original, shortcut, created, last_accessed, use_count";

#[derive(Debug, FromRow)]
struct ShortenedUrlRow {
    id: i64,
    original: String,
    shortcut: String,
    created: DateTime<Utc>,
    last_accessed: Option<DateTime<Utc>>,
    use_count: i64,
}

impl From<ShortenedUrlRow> for ShortenedUrl {
    fn from(r: ShortenedUrlRow) -> Self {
        ShortenedUrl::new(
            r.id,
            r.original,
            r.shortcut,
            r.created,
            r.last_accessed,
            r.use_count,
        )
    }
}

#[derive(Debug, FromRow)]
struct UsageSummaryRow {
    urls: i64,
    total_uses: i64,
}

/// PostgreSQL repository for shortened URLs.
///
/// Uniqueness of `shortcut` is enforced by the `shortened_urls_shortcut_key`
/// constraint; usage updates are single `UPDATE` statements.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn search_pattern(search: Option<String>) -> Option<String> {
    search.map(|s| {
        let escaped = s
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{}%", escaped)
    })
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn exists(&self, shortcut: &str) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM shortened_urls WHERE shortcut = $1)",
        )
        .bind(shortcut)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn create(&self, new_url: NewShortenedUrl) -> Result<ShortenedUrl, AppError> {
        let row: ShortenedUrlRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO shortened_urls (original, shortcut, created)
            VALUES ($1, $2, $3)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(new_url.original)
        .bind(new_url.shortcut)
        .bind(new_url.created)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_shortcut(&self, shortcut: &str) -> Result<Option<ShortenedUrl>, AppError> {
        let row: Option<ShortenedUrlRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM shortened_urls WHERE shortcut = $1"
        ))
        .bind(shortcut)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn record_usage(
        &self,
        shortcut: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ShortenedUrl>, AppError> {
        // GREATEST ignores NULL, so the first hit sets last_accessed to $2.
        let row: Option<ShortenedUrlRow> = sqlx::query_as(&format!(
            r#"
            UPDATE shortened_urls
            SET use_count = use_count + 1,
                last_accessed = GREATEST(last_accessed, $2)
            WHERE shortcut = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(shortcut)
        .bind(now)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list(
        &self,
        search: Option<String>,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<ShortenedUrl>, AppError> {
        let offset = (page - 1).saturating_mul(page_size);

        let rows: Vec<ShortenedUrlRow> = sqlx::query_as(&format!(
            r#"
            SELECT {COLUMNS}
            FROM shortened_urls
            WHERE ($1::text IS NULL OR shortcut ILIKE $1 OR original ILIKE $1)
            ORDER BY created DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(search_pattern(search))
        .bind(page_size)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, search: Option<String>) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM shortened_urls
            WHERE ($1::text IS NULL OR shortcut ILIKE $1 OR original ILIKE $1)
            "#,
        )
        .bind(search_pattern(search))
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn usage_summary(&self) -> Result<UsageSummary, AppError> {
        let row: UsageSummaryRow = sqlx::query_as(
            r#"
            SELECT COUNT(*) AS urls, COALESCE(SUM(use_count), 0)::BIGINT AS total_uses
            FROM shortened_urls
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(UsageSummary {
            urls: row.urls,
            total_uses: row.total_uses,
        })
    }

    async fn delete(&self, shortcut: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM shortened_urls WHERE shortcut = $1")
            .bind(shortcut)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
