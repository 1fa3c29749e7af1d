//! CLI administration tool for shortcut-service.
//!
//! Inspects and manages shortened URLs directly in the database, without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Browse records, newest first
//! cargo run --bin admin -- urls list --search example --page 2
//!
//! # Show one record
//! cargo run --bin admin -- urls show tdEaR
//!
//! # Shorten a URL
//! cargo run --bin admin -- urls create https://example.com/
//!
//! # Delete a record
//! cargo run --bin admin -- urls delete tdEaR
//!
//! # View usage totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `shortcut_service::config`); the storage backend
//! must be `postgres`.

use shortcut_service::application::services::UrlService;
use shortcut_service::config::{self, StorageBackend};
use shortcut_service::domain::entities::ShortenedUrl;
use shortcut_service::infrastructure::persistence::PgUrlRepository;
use shortcut_service::server::connect_pool;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

const DEFAULT_PAGE_SIZE: i64 = 25;

/// CLI tool for managing shortcut-service.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage shortened URLs
    Urls {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Show usage totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Shortened URL subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// List shortened URLs, newest first
    List {
        /// Case-insensitive filter on shortcut or original URL
        #[arg(short, long)]
        search: Option<String>,

        #[arg(short, long, default_value_t = 1)]
        page: i64,

        /// Records per page (at most 1000)
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: i64,
    },

    /// Show a single shortened URL
    Show { shortcut: String },

    /// Shorten a URL
    Create { url: String },

    /// Delete a shortened URL
    Delete {
        shortcut: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

type Service = UrlService<PgUrlRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("The admin tool works on the postgres storage backend only");
    }

    let pool = connect_pool(&config).await?;

    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));
    let service = UrlService::new(
        repository,
        config.shortcut_policy(),
        config.short_url_builder()?,
    );

    match cli.command {
        Commands::Urls { action } => handle_url_action(action, &service).await?,
        Commands::Stats => handle_stats(&service).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches shortened URL commands.
async fn handle_url_action(action: UrlAction, service: &Service) -> Result<()> {
    match action {
        UrlAction::List {
            search,
            page,
            page_size,
        } => list_urls(service, search, page, page_size).await,
        UrlAction::Show { shortcut } => show_url(service, &shortcut).await,
        UrlAction::Create { url } => create_url(service, url).await,
        UrlAction::Delete { shortcut, yes } => delete_url(service, &shortcut, yes).await,
    }
}

/// Lists shortened URLs.
///
/// # Output Format
///
/// ```text
/// 📋 Shortened URLs
///
///   Shortcut     Uses     Last accessed      Original
///   ───────────────────────────────────────────────────────────────────
///   tdEaR        3        2024-01-15 10:30   https://example.com/
/// ```
async fn list_urls(
    service: &Service,
    search: Option<String>,
    page: i64,
    page_size: i64,
) -> Result<()> {
    println!("{}", "📋 Shortened URLs".bright_blue().bold());
    println!();

    let urls = service.list(search.clone(), page, page_size).await?;
    let total = service.count(search).await?;

    if urls.is_empty() {
        println!("{}", "  No shortened URLs found".yellow());
        return Ok(());
    }

    println!(
        "  {:<12} {:<8} {:<18} {}",
        "Shortcut".bright_white().bold(),
        "Uses".bright_white().bold(),
        "Last accessed".bright_white().bold(),
        "Original".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for url in &urls {
        let last_accessed = url
            .last_accessed
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<12} {:<8} {:<18} {}",
            url.shortcut.cyan(),
            url.use_count.to_string().bright_green(),
            last_accessed.bright_black(),
            url.original
        );
    }

    let pages = total / page_size + i64::from(total % page_size != 0);
    println!();
    println!(
        "  Page {} of {}, {} total",
        page.to_string().bright_white().bold(),
        pages.max(1),
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn show_url(service: &Service, shortcut: &str) -> Result<()> {
    let url = service.get(shortcut).await?;
    print_details(service, &url);
    Ok(())
}

/// Shortens a URL through the same path as `POST /api/urls`.
async fn create_url(service: &Service, original: String) -> Result<()> {
    println!("{}", "✨ Shorten URL".bright_blue().bold());
    println!();

    let url = service.create(original).await?;

    println!("{}", "✅ Shortened URL created".green().bold());
    print_details(service, &url);

    Ok(())
}

/// Deletes a shortened URL after confirmation (default: No).
async fn delete_url(service: &Service, shortcut: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete shortened URL".bright_blue().bold());

    let url = service.get(shortcut).await?;
    print_details(service, &url);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this shortened URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service.delete(shortcut).await?;

    println!();
    println!("{}", "✅ Shortened URL deleted".green().bold());
    println!();

    Ok(())
}

fn print_details(service: &Service, url: &ShortenedUrl) {
    let last_accessed = url
        .last_accessed
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "never".to_string());

    println!();
    println!("  Shortcut:      {}", url.shortcut.cyan().bold());
    println!("  Original:      {}", url.original);
    println!(
        "  Short URL:     {}",
        service.shortened_url(&url.shortcut).bright_yellow()
    );
    println!("  Created:       {}", url.created.to_rfc3339().bright_black());
    println!("  Last accessed: {}", last_accessed.bright_black());
    println!(
        "  Uses:          {}",
        url.use_count.to_string().bright_green().bold()
    );
    println!();
}

/// Displays usage totals.
async fn handle_stats(service: &Service) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let summary = service.usage_summary().await?;

    println!(
        "  Shortened URLs: {}",
        summary.urls.to_string().bright_green().bold()
    );
    println!(
        "  Total uses:     {}",
        summary.total_uses.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}
