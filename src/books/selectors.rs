//! CSS selectors and text patterns for book page parsing.
//!
//! Everything here is compiled once per process. Update this file when the
//! marketplaces change their markup or listing layout.

use regex_lite::Regex;
use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for product detail pages.
pub mod product {
    use super::*;

    /// Main page heading, used as the title before metadata is consulted.
    pub static HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());

    /// Embedded JSON-LD blocks.
    pub static JSON_LD: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());

    /// Author-labelled regions, tried in order when no byline is found.
    pub static AUTHOR_REGIONS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
        [
            r#"[data-testid*="author"]"#,
            ".authors",
            ".author",
            ".product-authors",
            ".book-authors",
            ".contributors",
        ]
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect()
    });
}

/// Whole-line patterns for catalog listings.
pub mod lines {
    use super::*;

    /// A standalone year such as "2025".
    pub static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:19|20)\d{2}$").unwrap());

    /// A standalone price such as "$47.99".
    pub static PRICE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[$£€]\s*([0-9]+(?:\.[0-9]{2})?)$").unwrap());

    /// A rating count such as "(4)".
    pub static RATING_COUNT: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\((\d+)\)$").unwrap());
}

/// Free-text patterns for product pages.
pub mod text {
    use super::*;

    /// First year-shaped token.
    pub static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

    /// Leading year of a date value, compact forms like "20201023" included.
    pub static DATE_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:19|20)\d{2}").unwrap());

    /// "Publication date: Mar 15, 2021".
    pub static PUBLICATION_DATE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)Publication date\s*:?\s*([A-Za-z]{3,9}\s+\d{1,2},\s+\d{4})").unwrap()
    });

    /// Dollar amount anywhere in the text.
    pub static PRICE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\$([0-9]+(?:\.[0-9]{2})?)").unwrap());

    /// Rating-shaped token such as "4.6".
    pub static RATING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[0-5]\.[0-9]\b").unwrap());

    /// Byline at the start of a line.
    pub static BYLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^By\s+(.+)$").unwrap());

    /// Leading "By " in an author region.
    pub static BY_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\s*By\s+").unwrap());
}

/// Patterns for author strings.
pub mod authors {
    use super::*;

    /// Comma-separated capitalised names with an optional trailing "and" name.
    pub static NAME_LIST: LazyLock<Regex> = LazyLock::new(|| {
        let name = r"[A-Z][A-Za-z'.-]*(?: [A-Za-z][A-Za-z'.-]*)*";
        Regex::new(&format!(r"^{name}(?:, {name})*(?:,? and {name})?$")).unwrap()
    });

    /// A capitalised word, optionally with an apostrophe suffix ("O'Neil").
    pub static CAPITALIZED_WORD: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+(?:'[A-Za-z]+)?\b").unwrap());

    /// The word "and" between two names.
    pub static AND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+\band\b\s+").unwrap());
}
