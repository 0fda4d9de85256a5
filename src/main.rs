//! book-crawler - Book catalog and product page scraper CLI
//!
//! Fetches pages with TLS fingerprint emulation and extracts book records.

use anyhow::{Context, Result};
use book_crawler::commands::{CatalogCommand, ProductCommand};
use book_crawler::config::{Config, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "book-crawler",
    version,
    about = "Scrape book records from catalog listings and product pages",
    long_about = "Extracts title, authors, publication year, rating and price from bookseller pages, using TLS fingerprint emulation for reliable fetching."
)]
struct Cli {
    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "BOOKS_PROXY")]
    proxy: Option<String>,

    /// Delay between requests in milliseconds
    #[arg(long, global = true)]
    delay: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json, ndjson, csv)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Write output to a file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape catalog listing pages
    #[command(alias = "c")]
    Catalog {
        /// Catalog page URLs (defaults to catalog_urls from config)
        urls: Vec<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Scrape individual product pages
    #[command(alias = "p")]
    Product {
        /// Product page URLs (defaults to product_urls from config)
        urls: Vec<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Maximum number of results
    #[arg(short, long)]
    max: Option<usize>,

    /// Minimum price filter
    #[arg(long)]
    min_price: Option<f64>,

    /// Maximum price filter
    #[arg(long)]
    max_price: Option<f64>,

    /// Keep catalog records missing authors, year or price
    #[arg(long)]
    allow_incomplete: bool,

    /// Required keywords in title (comma-separated)
    #[arg(long, value_delimiter = ',')]
    keywords: Option<Vec<String>>,

    /// Excluded keywords from title (comma-separated)
    #[arg(long, value_delimiter = ',')]
    exclude: Option<Vec<String>>,
}

impl FilterArgs {
    fn apply(self, config: &mut Config) {
        if let Some(max) = self.max {
            config.max_results = max;
        }
        if self.min_price.is_some() {
            config.min_price = self.min_price;
        }
        if self.max_price.is_some() {
            config.max_price = self.max_price;
        }
        if self.allow_incomplete {
            config.require_complete = false;
        }
        if let Some(kw) = self.keywords {
            config.keywords = kw;
        }
        if let Some(ex) = self.exclude {
            config.exclude_keywords = ex;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    let output = match cli.command {
        Commands::Catalog { urls, filters } => {
            filters.apply(&mut config);
            CatalogCommand::new(config).execute(&urls).await?
        }

        Commands::Product { urls, filters } => {
            filters.apply(&mut config);
            ProductCommand::new(config).execute(&urls).await?
        }
    };

    match cli.output {
        Some(path) => {
            std::fs::write(&path, format!("{}\n", output))
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!("Wrote results to {}", path.display());
        }
        None => println!("{}", output),
    }

    Ok(())
}
