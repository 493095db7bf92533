//! CLI administration tool for snaplink.
//!
//! Read-only inspection of the PostgreSQL link store, plus migrations, without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show the 20 most recent links
//! cargo run --bin admin -- links recent --limit 20
//!
//! # Look up a single code
//! cargo run --bin admin -- links show aZ3k9Qx
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply pending migrations
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`

use snaplink::application::services::DEFAULT_LIST_LIMIT;
use snaplink::config::{Config, mask_connection_string};
use snaplink::domain::entities::Link;
use snaplink::domain::repositories::LinkRepository;
use snaplink::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::process::ExitCode;
use std::sync::Arc;

/// CLI tool for inspecting snaplink's store.
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
    /// Inspect stored links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link inspection subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// List the most recent links, newest first
    Recent {
        /// Number of links to show (1-100)
        #[arg(short, long, default_value_t = 20, value_parser = clap::value_parser!(i64).range(1..=DEFAULT_LIST_LIMIT))]
        limit: i64,
    },

    /// Show a single link by its code
    Show {
        /// Short code (exact match)
        code: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and count links
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Links { action } => handle_links_action(action, &pool).await,
        Commands::Db { action } => handle_db_action(action, &pool).await,
    }
}

/// Dispatches link inspection commands.
async fn handle_links_action(action: LinksAction, pool: &PgPool) -> Result<ExitCode> {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    match action {
        LinksAction::Recent { limit } => list_recent(&repo, limit).await,
        LinksAction::Show { code } => show_link(&repo, &code).await,
    }
}

/// Prints recent links as a table.
///
/// # Output Format
///
/// ```text
/// Recent links
///
///   Code       Created              URL
///   ──────────────────────────────────────────────────────────────
///   aZ3k9Qx    2026-01-15 10:30     https://example.com
/// ```
async fn list_recent(repo: &PgLinkRepository, limit: i64) -> Result<ExitCode> {
    println!("{}", "Recent links".bright_blue().bold());
    println!();

    let links = repo
        .list_recent(limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(ExitCode::SUCCESS);
    }

    println!(
        "  {:<10} {:<20} {}",
        "Code".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<10} {:<20} {}",
            link.code.cyan(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.original_url
        );
    }

    println!();
    println!("  Shown: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(ExitCode::SUCCESS)
}

/// Prints one link, or exits with status 1 if the code is unknown.
async fn show_link(repo: &PgLinkRepository, code: &str) -> Result<ExitCode> {
    let link = repo
        .find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    match link {
        Some(link) => {
            print_link(&link);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("{} {}", "Not found:".red().bold(), code);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_link(link: &Link) {
    println!("  Code:    {}", link.code.cyan().bold());
    println!("  URL:     {}", link.original_url);
    println!(
        "  Created: {}",
        link.created_at.to_rfc3339().bright_black()
    );
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<ExitCode> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            let repo = PgLinkRepository::new(Arc::new(pool.clone()));
            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;
            let count = repo
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

            println!("{}", "Database connection OK".green().bold());
            println!("  Links: {}", count.to_string().bright_green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;

            println!("{}", "Migrations applied".green().bold());
        }
    }

    Ok(ExitCode::SUCCESS)
}
