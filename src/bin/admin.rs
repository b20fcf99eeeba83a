//! CLI administration tool for link-shortener.
//!
//! Works directly on the SQLite file, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Save a URL under a random alias
//! cargo run --bin admin -- url save https://example.com
//!
//! # Save a URL under a chosen alias
//! cargo run --bin admin -- url save https://example.com --alias example
//!
//! # Look up an alias
//! cargo run --bin admin -- url get example
//!
//! # Check that the storage opens and migrations apply
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `STORAGE_PATH` (optional): SQLite file, defaults to `./storage/storage.db`
//! - `ALIAS_LENGTH`, `ALIAS_ALPHABET` (optional): generated alias settings

use link_shortener::api::dto::save::SaveRequest;
use link_shortener::application::services::UrlService;
use link_shortener::config::storage_path_from_env;
use link_shortener::error::StorageError;
use link_shortener::infrastructure::persistence::SqliteUrlStore;
use link_shortener::utils::alias_generator::{
    AliasGenerator, DEFAULT_ALIAS_LENGTH, DEFAULT_ALPHABET,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;
use std::time::Duration;

const STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// CLI tool for managing link-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save and look up URLs
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UrlAction {
    /// Save a URL
    Save {
        /// Absolute URL to store
        url: String,

        /// Alias to store it under (random if omitted)
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Print the URL stored under an alias
    Get {
        alias: String,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let path = storage_path_from_env();
    let store = SqliteUrlStore::open(&path, 1)
        .await
        .with_context(|| format!("Failed to open storage at {}", path.display()))?;

    let result = match cli.command {
        Commands::Url { action } => handle_url_action(action, &store).await,
        Commands::Db { action } => handle_db_action(action, &store).await,
    };

    store.close().await;
    result
}

fn generator_from_env() -> Result<AliasGenerator> {
    let length = std::env::var("ALIAS_LENGTH")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_ALIAS_LENGTH);
    let alphabet =
        std::env::var("ALIAS_ALPHABET").unwrap_or_else(|_| DEFAULT_ALPHABET.to_string());

    AliasGenerator::new(&alphabet, length).context("Invalid alias generator settings")
}

/// Dispatches URL commands.
async fn handle_url_action(action: UrlAction, store: &SqliteUrlStore) -> Result<()> {
    let service = UrlService::new(
        Arc::new(store.clone()),
        generator_from_env()?,
        STORAGE_TIMEOUT,
    );

    match action {
        UrlAction::Save { url, alias } => {
            let request = SaveRequest::new(url.as_str(), alias.clone());
            if let Err(message) = request.check() {
                anyhow::bail!("invalid request: {message}");
            }

            match service.save(&url, alias).await {
                Ok(record) => {
                    println!("{}", "✅ URL saved".green().bold());
                    println!();
                    println!("  Alias: {}", record.alias.bright_yellow().bold());
                    println!("  URL:   {}", record.url.bright_white());
                    println!();
                }
                Err(StorageError::UrlExists) => {
                    println!("{}", "❌ Alias already exists".red().bold());
                }
                Err(e) => return Err(e).context("Failed to save url"),
            }
        }
        UrlAction::Get { alias } => match service.resolve(&alias).await {
            Ok(url) => println!("{url}"),
            Err(StorageError::UrlNotFound) => {
                println!("{}", format!("❌ Alias '{alias}' not found").red().bold());
            }
            Err(e) => return Err(e).context("Failed to get url"),
        },
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, store: &SqliteUrlStore) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(store.pool()).await?;

            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url")
                .fetch_one(store.pool())
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Stored URLs: {}", count.to_string().bright_green().bold());
        }
    }

    Ok(())
}
