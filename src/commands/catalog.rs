//! Catalog scrape command implementation.

use super::resolve_urls;
use crate::books::{normalize_authors, parse_catalog_with, BookRecord, Fetcher, HttpFetcher};
use crate::config::Config;
use crate::filters::FilterChainBuilder;
use crate::format::Formatter;
use anyhow::{Context, Result};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Scrapes catalog listing pages.
pub struct CatalogCommand {
    config: Config,
}

impl CatalogCommand {
    /// Creates a new catalog command.
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
        Ok(formatter.format_records(&records))
    }

    /// Fetches, parses, merges and filters records from every page.
    pub async fn collect(
        &self,
        fetcher: &impl Fetcher,
        urls: &[String],
    ) -> Result<Vec<BookRecord>> {
        let urls = resolve_urls(urls, &self.config.catalog_urls, "catalog")?;

        let filters = FilterChainBuilder::from_config(&self.config)
            .complete(self.config.require_complete)
            .build();
        if !filters.is_empty() {
            debug!("Active filters: {}", filters.descriptions().join(", "));
        }

        let mut all_records: Vec<BookRecord> = Vec::new();
        let mut seen_titles: HashSet<String> = HashSet::new();

        for url in &urls {
            info!("Scraping catalog: {}", url);

            let html = match fetcher.fetch(url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!("Skipping {}: {}", url, e);
                    continue;
                }
            };

            let records = parse_catalog_with(&html, url, &self.config.rules);
            let parsed = records.len();

            for mut record in records {
                record.authors = record.authors.as_deref().and_then(normalize_authors);

                if seen_titles.insert(record.title.clone()) {
                    all_records.push(record);
                } else {
                    debug!("Dropping '{}' from {}: already seen", record.title, url);
                }
            }

            debug!("{} records from {}", parsed, url);
        }

        let mut filtered = filters.apply(all_records);
        filtered.truncate(self.config.max_results);

        info!("Found {} books matching criteria", filtered.len());
        Ok(filtered)
    }
}
