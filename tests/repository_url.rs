use chrono::{Duration, Utc};
use shortcut_service::domain::entities::{NewShortenedUrl, UsageSummary};
use shortcut_service::domain::repositories::UrlRepository;
use shortcut_service::error::AppError;
use shortcut_service::infrastructure::persistence::PgUrlRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_url(shortcut: &str, original: &str) -> NewShortenedUrl {
    NewShortenedUrl {
        original: original.to_string(),
        shortcut: shortcut.to_string(),
        created: Utc::now(),
    }
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_url(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let url = repo
        .create(new_url("abcde", "https://example.com/"))
        .await
        .unwrap();

    assert_eq!(url.shortcut, "abcde");
    assert_eq!(url.original, "https://example.com/");
    assert_eq!(url.use_count, 0);
    assert!(url.last_accessed.is_none());
    assert!(repo.exists("abcde").await.unwrap());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_duplicate_shortcut(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    repo.create(new_url("abcde", "https://example.com/"))
        .await
        .unwrap();

    let result = repo.create(new_url("abcde", "https://other.com/")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_shortcuts_are_case_sensitive(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    repo.create(new_url("abcde", "https://example.com/"))
        .await
        .unwrap();

    assert!(!repo.exists("ABCDE").await.unwrap());
    assert!(repo.create(new_url("ABCDE", "https://example.com/")).await.is_ok());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_record_usage(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    repo.create(new_url("abcde", "https://example.com/"))
        .await
        .unwrap();

    let later = Utc::now();
    let earlier = later - Duration::seconds(30);

    let url = repo.record_usage("abcde", later).await.unwrap().unwrap();
    assert_eq!(url.use_count, 1);

    let url = repo.record_usage("abcde", earlier).await.unwrap().unwrap();
    assert_eq!(url.use_count, 2);
    assert!(url.last_accessed.unwrap() > earlier);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_record_usage_not_found(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let result = repo.record_usage("missing", Utc::now()).await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_concurrent_record_usage(pool: PgPool) {
    let repo = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    repo.create(new_url("abcde", "https://example.com/"))
        .await
        .unwrap();

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.record_usage("abcde", Utc::now()).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let url = repo.find_by_shortcut("abcde").await.unwrap().unwrap();
    assert_eq!(url.use_count, 50);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_list_count_summary_delete(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    let base = Utc::now();
    for (i, (shortcut, original)) in [
        ("aaaaa", "https://google.com/"),
        ("bbbbb", "https://example.com/50%_off"),
        ("ccccc", "https://example.com/two"),
    ]
    .into_iter()
    .enumerate()
    {
        let mut url = new_url(shortcut, original);
        url.created = base + Duration::seconds(i as i64);
        repo.create(url).await.unwrap();
    }
    repo.record_usage("aaaaa", Utc::now()).await.unwrap();
    repo.record_usage("bbbbb", Utc::now()).await.unwrap();

    let page = repo.list(None, 1, 2).await.unwrap();
    assert_eq!(page[0].shortcut, "ccccc");
    assert_eq!(page[1].shortcut, "bbbbb");

    assert_eq!(repo.count(Some("EXAMPLE".to_string())).await.unwrap(), 2);
    assert_eq!(repo.count(Some("%_".to_string())).await.unwrap(), 1);

    assert_eq!(
        repo.usage_summary().await.unwrap(),
        UsageSummary {
            urls: 3,
            total_uses: 2
        }
    );

    assert!(repo.delete("aaaaa").await.unwrap());
    assert!(!repo.delete("aaaaa").await.unwrap());
    assert_eq!(repo.count(None).await.unwrap(), 2);
}
