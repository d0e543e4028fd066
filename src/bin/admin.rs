//! CLI administration tool for linkrank.
//!
//! Works against the same stores as the server, configured through the same
//! environment variables.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- links list
//!
//! # Create a link
//! cargo run --bin admin -- links create abc123 https://example.com/a
//!
//! # Show the leaderboard
//! cargo run --bin admin -- metrics top --limit 10
//!
//! # Clear every click count
//! cargo run --bin admin -- metrics reset
//!
//! # Check store connections
//! cargo run --bin admin -- db check
//! ```

use linkrank::application::services::{
    CreateLinkError, DEFAULT_TOP_LIMIT, LinkService, MetricsService,
};
use linkrank::config::{self, Config};
use linkrank::server::{self, RankingFallback, Stores};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

/// CLI tool for managing linkrank.
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
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Inspect or clear the click leaderboard
    Metrics {
        #[command(subcommand)]
        action: MetricsAction,
    },

    /// Store diagnostics
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinksAction {
    /// List all links, newest first
    List,

    /// Create a link
    Create {
        /// Short code (at least 3 characters)
        code: String,

        /// Absolute destination URL
        url: String,
    },
}

#[derive(Subcommand)]
enum MetricsAction {
    /// Show the most clicked links
    Top {
        /// Number of entries to show
        #[arg(short, long, default_value_t = DEFAULT_TOP_LIMIT)]
        limit: usize,
    },

    /// Remove every click count
    Reset {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check both store connections
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    warn_if_ephemeral(&config);

    let stores = server::connect_stores(&config, RankingFallback::Fail).await?;

    match cli.command {
        Commands::Links { action } => handle_links_action(action, &stores).await?,
        Commands::Metrics { action } => handle_metrics_action(action, &stores).await?,
        Commands::Db { action } => handle_db_action(action, &stores).await?,
    }

    Ok(())
}

/// In-memory stores die with this process, so admin commands on them are moot.
fn warn_if_ephemeral(config: &Config) {
    if config.database_url.is_none() {
        println!(
            "{}",
            "⚠️  DATABASE_URL not set: links live in this process only".yellow()
        );
    }
    if config.redis_url.is_none() {
        println!(
            "{}",
            "⚠️  Redis not configured: the leaderboard lives in this process only".yellow()
        );
    }
}

async fn handle_links_action(action: LinksAction, stores: &Stores) -> Result<()> {
    let service = LinkService::new(stores.links.clone());

    match action {
        LinksAction::List => list_links(&service).await?,
        LinksAction::Create { code, url } => create_link(&service, code, url).await?,
    }

    Ok(())
}

/// Lists all links in a table.
///
/// # Output Format
///
/// ```text
/// 🔗 Links
///
///   ID    Code             Created           Destination
///   ───────────────────────────────────────────────────────────────
///   2     docs             2025-01-16 14:20  https://example.com/docs
///   1     abc123           2025-01-15 10:30  https://example.com/a
/// ```
async fn list_links(service: &LinkService) -> Result<()> {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<16} {:<17} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Created".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<5} {:<16} {:<17} {}",
            link.id.to_string().bright_black(),
            link.code.cyan(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.destination_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn create_link(service: &LinkService, code: String, url: String) -> Result<()> {
    match service.create_link(code, url).await {
        Ok(link) => {
            println!("{}", "✅ Link created".green().bold());
            println!("  ID:   {}", link.id.to_string().bright_white().bold());
            println!("  Code: {}", link.code.cyan());
            println!("  URL:  {}", link.destination_url);
            Ok(())
        }
        Err(CreateLinkError::Validation(ref e)) => {
            println!("{}", "❌ Invalid link".red().bold());
            for (field, errors) in e.field_errors() {
                for error in errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    println!("  {}: {}", field.to_string().yellow(), message);
                }
            }
            anyhow::bail!("validation failed")
        }
        Err(CreateLinkError::DuplicateCode(code)) => {
            anyhow::bail!("Code '{}' is already taken", code)
        }
        Err(e) => Err(anyhow::anyhow!("Failed to create link: {}", e)),
    }
}

async fn handle_metrics_action(action: MetricsAction, stores: &Stores) -> Result<()> {
    let service = MetricsService::new(stores.ranking.clone());

    match action {
        MetricsAction::Top { limit } => show_top(&service, limit).await?,
        MetricsAction::Reset { yes } => reset_metrics(&service, yes).await?,
    }

    Ok(())
}

/// Prints the leaderboard.
///
/// ```text
/// 📊 Top 3 links
///
///   #    Link ID    Clicks
///   ──────────────────────────
///   1    1          3
///   2    4          1
/// ```
async fn show_top(service: &MetricsService, limit: usize) -> Result<()> {
    println!(
        "{}",
        format!("📊 Top {} links", limit).bright_blue().bold()
    );
    println!();

    let top = service
        .top_metrics(limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read leaderboard: {}", e))?;

    if top.is_empty() {
        println!("{}", "  No clicks recorded".yellow());
        return Ok(());
    }

    println!(
        "  {:<4} {:<10} {}",
        "#".bright_white().bold(),
        "Link ID".bright_white().bold(),
        "Clicks".bright_white().bold()
    );
    println!("  {}", "─".repeat(26).bright_black());

    for (rank, entry) in top.iter().enumerate() {
        println!(
            "  {:<4} {:<10} {}",
            (rank + 1).to_string().bright_black(),
            entry.link_id.to_string().cyan(),
            entry.score.to_string().bright_green().bold()
        );
    }
    println!();

    Ok(())
}

/// Clears the leaderboard after confirmation (default: No).
async fn reset_metrics(service: &MetricsService, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Reset leaderboard".bright_blue().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Remove every click count?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .reset()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to reset leaderboard: {}", e))?;

    println!("{}", "✅ Leaderboard cleared".green().bold());
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, stores: &Stores) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking store connections...".bright_blue());

            let (links_ok, ranking_ok) = tokio::join!(
                stores.links.health_check(),
                stores.ranking.health_check()
            );

            report("Link store", links_ok);
            report("Ranking store", ranking_ok);

            if !(links_ok && ranking_ok) {
                anyhow::bail!("one or more stores are unreachable");
            }
        }
    }

    Ok(())
}

fn report(component: &str, healthy: bool) {
    if healthy {
        println!("  {} {}", "✅".green(), component);
    } else {
        println!("  {} {} unreachable", "❌".red(), component.red().bold());
    }
}
