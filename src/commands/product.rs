//! Product page scrape command implementation.

use super::resolve_urls;
use crate::books::{parse_product, BookRecord, Fetcher, HttpFetcher};
use crate::config::Config;
use crate::filters::FilterChainBuilder;
use crate::format::Formatter;
use anyhow::{Context, Result};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Scrapes individual product pages.
pub struct ProductCommand {
    config: Config,
}

impl ProductCommand {
    /// Creates a new product command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scrapes the given pages (or the configured ones) and returns formatted output.
    pub async fn execute(&self, urls: &[String]) -> Result<String> {
        let fetcher = HttpFetcher::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_fetcher(&fetcher, urls).await
    }

    /// Scrapes with a provided fetcher (for testing).
    pub async fn execute_with_fetcher(
        &self,
        fetcher: &impl Fetcher,
        urls: &[String],
    ) -> Result<String> {
        let records = self.collect(fetcher, urls).await?;

        let formatter = Formatter::new(self.config.format);
        if let [record] = records.as_slice() {
            return Ok(formatter.format_record(record));
        }
        Ok(formatter.format_records(&records))
    }

    /// Fetches and parses every page, then de-duplicates and filters the records.
    ///
    /// Missing authors, year or price never drop a product record; only the
    /// price and keyword filters apply here.
    pub async fn collect(
        &self,
        fetcher: &impl Fetcher,
        urls: &[String],
    ) -> Result<Vec<BookRecord>> {
        let urls = resolve_urls(urls, &self.config.product_urls, "product")?;

        let filters = FilterChainBuilder::from_config(&self.config).build();
        if !filters.is_empty() {
            debug!("Active filters: {}", filters.descriptions().join(", "));
        }

        let mut records: Vec<BookRecord> = Vec::new();
        let mut seen_titles: HashSet<String> = HashSet::new();

        for url in &urls {
            info!("Scraping product: {}", url);

            let html = match fetcher.fetch(url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("Skipping {}: {}", url, e);
                    continue;
                }
            };

            let Some(record) = parse_product(&html, url) else {
                warn!("Skipping {}: no title found", url);
                continue;
            };

            if seen_titles.insert(record.title.clone()) {
                records.push(record);
            } else {
                debug!("Dropping '{}' from {}: already seen", record.title, url);
            }
        }

        let mut filtered = filters.apply(records);
        filtered.truncate(self.config.max_results);

        info!("Found {} books matching criteria", filtered.len());
        Ok(filtered)
    }
}
