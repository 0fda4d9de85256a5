//! Product page extractor.
//!
//! Each field is read from the page's JSON-LD Product node when it has one and
//! falls back to text heuristics otherwise. Missing fields stay `None`; the
//! page never fails to parse because of its shape.

use crate::books::authors::{is_plausible_author, normalize_authors};
use crate::books::jsonld::{as_number, find_product, person_names};
use crate::books::models::{BookRecord, Rating};
use crate::books::selectors::{product, text};
use crate::books::text::{document_lines, element_text, json_ld_blocks, squash_whitespace};
use scraper::Html;
use serde_json::Value;
use tracing::{debug, trace};

/// Lines searched for a "By ..." byline.
const BYLINE_SCAN_LINES: usize = 250;

/// Person names kept when falling back to the metadata graph.
const MAX_PERSON_AUTHORS: usize = 5;

/// Characters inspected on each side of a rating keyword.
const RATING_WINDOW: usize = 80;

const RATING_KEYWORDS: &[&str] = &["rating", "review", "star"];

/// Parses a product page into a record.
///
/// Returns `None` only when the page has neither a heading nor a metadata
/// name to use as the title.
pub fn parse_product(html: &str, source_url: &str) -> Option<BookRecord> {
    let page = ProductPage::parse(html);

    let Some(title) = page.title() else {
        debug!("No title found on {}", source_url);
        return None;
    };

    let authors = page.authors().and_then(|a| normalize_authors(&a));

    Some(BookRecord {
        title,
        authors,
        year: page.year(),
        star_rating: page.rating().map(Rating::Stars),
        price: page.price(),
        source_url: source_url.to_string(),
    })
}

/// A parsed product page with its text and metadata views.
struct ProductPage {
    document: Html,
    lines: Vec<String>,
    blocks: Vec<Value>,
}

impl ProductPage {
    fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let lines = document_lines(&document);
        let blocks = json_ld_blocks(&document);
        Self { document, lines, blocks }
    }

    fn product(&self) -> Option<&Value> {
        find_product(&self.blocks)
    }

    /// Metadata string field, ignoring blanks.
    fn product_str(&self, key: &str) -> Option<&str> {
        self.product()?.get(key)?.as_str().map(str::trim).filter(|s| !s.is_empty())
    }

    fn title(&self) -> Option<String> {
        if let Some(name) = self.product_str("name") {
            return Some(name.to_string());
        }

        self.document
            .select(&product::HEADING)
            .next()
            .map(element_text)
            .filter(|t| !t.is_empty())
    }

    fn authors(&self) -> Option<String> {
        if let Some(authors) = self.product().and_then(|p| p.get("author")).and_then(metadata_authors)
        {
            trace!("Authors from metadata");
            return Some(authors);
        }

        if let Some(byline) = self.byline() {
            trace!("Authors from byline");
            return Some(byline);
        }

        if let Some(region) = self.author_region() {
            trace!("Authors from author region");
            return Some(region);
        }

        let names = person_names(&self.blocks);
        if names.is_empty() {
            return None;
        }
        trace!("Authors from {} Person nodes", names.len());
        Some(names.into_iter().take(MAX_PERSON_AUTHORS).collect::<Vec<_>>().join(", "))
    }

    /// First plausible "By ..." line near the top of the page.
    fn byline(&self) -> Option<String> {
        self.lines.iter().take(BYLINE_SCAN_LINES).find_map(|line| {
            let line = squash_whitespace(line);
            let caps = text::BYLINE.captures(&line)?;
            let candidate = caps[1].trim_matches(|c: char| matches!(c, ' ' | '-' | '|'));
            is_plausible_author(candidate).then(|| candidate.to_string())
        })
    }

    /// First plausible text in an author-labelled element.
    fn author_region(&self) -> Option<String> {
        product::AUTHOR_REGIONS.iter().find_map(|selector| {
            self.document.select(selector).find_map(|element| {
                let region = element_text(element);
                let candidate = text::BY_PREFIX.replace(&region, "").trim().to_string();
                is_plausible_author(&candidate).then_some(candidate)
            })
        })
    }

    fn year(&self) -> Option<u16> {
        if let Some(year) = self.product_str("datePublished").and_then(date_year) {
            return Some(year);
        }

        let page_text = self.lines.join("\n");
        text::PUBLICATION_DATE
            .captures(&page_text)
            .and_then(|caps| date_year(&caps[1]))
            .or_else(|| first_year(&page_text))
    }

    fn rating(&self) -> Option<f64> {
        let from_metadata = self
            .product()
            .and_then(|p| p.get("aggregateRating"))
            .filter(|agg| agg.is_object())
            .and_then(|agg| agg.get("ratingValue"))
            .and_then(as_number);
        if from_metadata.is_some() {
            return from_metadata;
        }

        rating_from_text(&self.lines.join(" "))
    }

    fn price(&self) -> Option<f64> {
        let from_metadata = match self.product().and_then(|p| p.get("offers")) {
            Some(offer @ Value::Object(_)) => offer.get("price").and_then(as_number),
            Some(Value::Array(offers)) => {
                offers.iter().filter_map(|offer| offer.get("price")).find_map(as_number)
            }
            _ => None,
        };
        if from_metadata.is_some() {
            return from_metadata;
        }

        let page_text = self.lines.join("\n");
        text::PRICE.captures(&page_text).and_then(|caps| caps[1].parse().ok())
    }
}

/// Author names from a metadata `author` field: an object, a list, or a string.
fn metadata_authors(author: &Value) -> Option<String> {
    let joined = match author {
        Value::Object(_) => author.get("name").and_then(Value::as_str)?.trim().to_string(),
        Value::String(name) => name.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(_) => item.get("name").and_then(Value::as_str),
                Value::String(name) => Some(name.as_str()),
                _ => None,
            })
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => return None,
    };

    (!joined.is_empty()).then_some(joined)
}

fn first_year(s: &str) -> Option<u16> {
    text::YEAR.find(s).and_then(|m| m.as_str().parse().ok())
}

fn date_year(s: &str) -> Option<u16> {
    text::DATE_YEAR.find(s).and_then(|m| m.as_str().parse().ok())
}

/// Finds a 0-5 rating near a rating keyword, else anywhere in the text.
fn rating_from_text(page_text: &str) -> Option<f64> {
    let lower = page_text.to_ascii_lowercase();

    for &keyword in RATING_KEYWORDS {
        for (at, _) in lower.match_indices(keyword) {
            if let Some(rating) = first_rating(window(page_text, at, RATING_WINDOW)) {
                return Some(rating);
            }
        }
    }

    first_rating(page_text)
}

fn first_rating(s: &str) -> Option<f64> {
    text::RATING
        .find_iter(s)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .find(|value| (0.0..=5.0).contains(value))
}

/// Up to `radius` characters either side of byte offset `at`.
fn window(text: &str, at: usize, radius: usize) -> &str {
    let start = text[..at].char_indices().rev().take(radius).last().map_or(at, |(i, _)| i);
    let end = text[at..].char_indices().nth(radius).map_or(text.len(), |(i, _)| at + i);
    &text[start..end]
}
