//! Catalog listing scanner.
//!
//! Catalog pages render each book as a run of plain text lines:
//!
//! ```text
//! Kafka in Action
//! Dylan Scott
//! ,
//! 2021
//! $39.99
//! $27.99
//! (12)
//! ```
//!
//! There are no reliable element hooks, so records are rebuilt from the order
//! and shape of the lines. A title candidate opens a block, the first year
//! line within the lookahead window anchors it, everything in between is the
//! author byline, and the prices after the year close it.

use crate::books::classify::{
    is_price_line, is_rating_count_line, is_separator, is_year_line, price_value, rating_count,
    year_value, CatalogRules, DEFAULT_RULES,
};
use crate::books::models::{BookRecord, Rating};
use crate::books::text::lines_of;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Parses a catalog page with the default rules.
pub fn parse_catalog(html: &str, source_url: &str) -> Vec<BookRecord> {
    parse_catalog_with(html, source_url, &DEFAULT_RULES)
}

/// Parses a catalog page with site-specific rules.
pub fn parse_catalog_with(html: &str, source_url: &str, rules: &CatalogRules) -> Vec<BookRecord> {
    let lines = lines_of(html);
    let records = scan_lines(&lines, source_url, rules);

    debug!("Parsed {} records from {} lines of {}", records.len(), lines.len(), source_url);
    records
}

/// Groups an already normalized line stream into records.
///
/// Titles are unique in the output; when a title repeats, the first block wins
/// and later ones are skipped without rescanning their lines.
pub fn scan_lines<S: AsRef<str>>(
    lines: &[S],
    source_url: &str,
    rules: &CatalogRules,
) -> Vec<BookRecord> {
    let lines: Vec<&str> = lines.iter().map(|l| l.as_ref().trim()).collect();
    let mut records = Vec::new();
    let mut seen_titles = HashSet::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(block) = scan_block(&lines, i, rules) else {
            i += 1;
            continue;
        };

        let end = block.end;
        if seen_titles.insert(block.title.clone()) {
            trace!("Block {}..{}: {}", i, end, block.title);
            records.push(block.into_record(source_url));
        } else {
            debug!("Skipping duplicate title: {}", block.title);
        }

        i = end.max(i + 1);
    }

    records
}

/// Fields of one listing and the index just past its price scan.
#[derive(Debug)]
struct Block {
    title: String,
    authors: String,
    year: u16,
    price: f64,
    rating: Option<u32>,
    end: usize,
}

impl Block {
    fn into_record(self, source_url: &str) -> BookRecord {
        BookRecord {
            title: self.title,
            authors: Some(self.authors),
            year: Some(self.year),
            star_rating: self.rating.map(Rating::Count),
            price: Some(self.price),
            source_url: source_url.to_string(),
        }
    }
}

/// Tries to read a block whose title is `lines[start]`.
fn scan_block(lines: &[&str], start: usize, rules: &CatalogRules) -> Option<Block> {
    let title = lines[start];
    if !rules.looks_like_title(title) {
        return None;
    }

    let year_end = (start + 1 + rules.year_window).min(lines.len());
    let Some(year_idx) = (start + 1..year_end).find(|&j| is_year_line(lines[j])) else {
        trace!("No year within {} lines of '{}'", rules.year_window, title);
        return None;
    };
    let year = year_value(lines[year_idx])?;

    let authors = lines[start + 1..year_idx]
        .iter()
        .copied()
        .filter(|part| !is_author_filler(part, rules))
        .collect::<Vec<_>>()
        .join(" ");
    if authors.is_empty() {
        trace!("No authors between '{}' and its year", title);
        return None;
    }

    let price_end = (year_idx + 1 + rules.price_window).min(lines.len());
    let mut prices = Vec::new();
    let mut last_price_idx = None;
    let mut idx = year_idx + 1;

    while idx < price_end {
        if let Some(price) = price_value(lines[idx]) {
            prices.push(price);
            last_price_idx = Some(idx);
        } else if idx > year_idx + 1 && rules.looks_like_title(lines[idx]) {
            // Next listing starts here
            break;
        }
        idx += 1;
    }

    // A discounted price follows the list price
    let Some(&price) = prices.last() else {
        trace!("No price after year of '{}'", title);
        return None;
    };

    let rating = last_price_idx
        .and_then(|p| lines.get(p + 1))
        .and_then(|line| rating_count(line));

    Some(Block { title: title.to_string(), authors, year, price, rating, end: idx })
}

fn is_author_filler(line: &str, rules: &CatalogRules) -> bool {
    is_separator(line)
        || rules.is_noise(line)
        || is_price_line(line)
        || is_rating_count_line(line)
        || is_year_line(line)
}
