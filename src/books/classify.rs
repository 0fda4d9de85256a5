//! Line classification for catalog listings.
//!
//! Catalog pages give no markup that separates a title from an author or a
//! category tag, so lines are told apart by shape alone. The denylist and the
//! lookahead windows vary per site and live in [`CatalogRules`], which can be
//! loaded from config. The shape patterns themselves are process-wide.

use crate::books::selectors::lines;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Navigation, category and UI labels seen on Manning catalog pages.
const MANNING_NOISE: &[&str] = &[
    "manning.com",
    "/",
    "catalog",
    "browse",
    "home",
    "cart",
    "log in",
    "sort:",
    "newest",
    "popularity",
    "software development",
    "cloud",
    "data engineering",
    "databases",
    "database platforms",
];

/// Lines that only separate authors.
const SEPARATORS: &[&str] = &[",", "|"];

/// Rules shared by every scan that does not bring its own.
pub static DEFAULT_RULES: LazyLock<CatalogRules> = LazyLock::new(CatalogRules::default);

/// Site-specific knobs for the catalog scanner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogRules {
    /// Lines that are never titles or authors, compared case-insensitively
    #[serde(serialize_with = "sorted_noise")]
    pub noise: HashSet<String>,
    /// How many lines after a title may hold its year
    pub year_window: usize,
    /// How many lines after the year may hold prices
    pub price_window: usize,
    /// Shortest line considered a title
    pub min_title_len: usize,
}

impl Default for CatalogRules {
    fn default() -> Self {
        Self::with_noise(MANNING_NOISE.iter().copied())
    }
}

fn sorted_noise<S: serde::Serializer>(noise: &HashSet<String>, s: S) -> Result<S::Ok, S::Error> {
    let mut sorted: Vec<_> = noise.iter().collect();
    sorted.sort();
    serde::Serialize::serialize(&sorted, s)
}

impl CatalogRules {
    /// Creates rules with the default windows and the given denylist.
    pub fn with_noise<I, S>(noise: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            noise: noise.into_iter().map(|s| s.as_ref().trim().to_lowercase()).collect(),
            year_window: 7,
            price_window: 6,
            min_title_len: 6,
        }
    }

    /// Lowercases the denylist after deserialization.
    pub fn normalized(mut self) -> Self {
        self.noise = self.noise.iter().map(|s| s.trim().to_lowercase()).collect();
        self
    }

    /// True for denylisted labels and bare separators.
    pub fn is_noise(&self, line: &str) -> bool {
        let line = line.trim();
        is_separator(line) || self.noise.contains(&line.to_lowercase())
    }

    /// True if the line could start a new listing.
    ///
    /// Rejects noise, years, prices, rating counts, short lines and lone words
    /// such as "Cart".
    pub fn looks_like_title(&self, line: &str) -> bool {
        let line = line.trim();
        if line.chars().count() < self.min_title_len {
            return false;
        }
        if self.is_noise(line) {
            return false;
        }
        if is_year_line(line) || is_price_line(line) || is_rating_count_line(line) {
            return false;
        }

        let mut words = line.split_whitespace();
        let single_word = words.next().is_some() && words.next().is_none();
        !(single_word && line.chars().all(char::is_alphabetic))
    }
}

/// True for "," and "|".
pub fn is_separator(line: &str) -> bool {
    SEPARATORS.contains(&line.trim())
}

/// True for a line holding only a 19xx or 20xx year.
pub fn is_year_line(line: &str) -> bool {
    lines::YEAR.is_match(line.trim())
}

/// Parses a year line.
pub fn year_value(line: &str) -> Option<u16> {
    let line = line.trim();
    if is_year_line(line) {
        line.parse().ok()
    } else {
        None
    }
}

/// True for a line holding only a `$`, `£` or `€` amount.
pub fn is_price_line(line: &str) -> bool {
    lines::PRICE.is_match(line.trim())
}

/// Amount of a price line without its currency symbol.
pub fn price_value(line: &str) -> Option<f64> {
    lines::PRICE.captures(line.trim()).and_then(|caps| caps[1].parse().ok())
}

/// True for a line shaped like "(12)".
pub fn is_rating_count_line(line: &str) -> bool {
    lines::RATING_COUNT.is_match(line.trim())
}

/// Count inside a rating count line. Overflowing counts yield `None`.
pub fn rating_count(line: &str) -> Option<u32> {
    lines::RATING_COUNT.captures(line.trim()).and_then(|caps| caps[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_line() {
        assert!(is_year_line("2021"));
        assert!(is_year_line("  1999 "));
        assert!(!is_year_line("1899"));
        assert!(!is_year_line("2021 edition"));
        assert_eq!(year_value("2021"), Some(2021));
        assert_eq!(year_value("May 2021"), None);
    }

    #[test]
    fn test_price_line() {
        assert!(is_price_line("$39.99"));
        assert!(is_price_line("£12"));
        assert!(is_price_line("€ 8.50"));
        assert!(!is_price_line("¥100"));
        assert!(!is_price_line("from $39.99"));

        assert_eq!(price_value("$39.99"), Some(39.99));
        assert_eq!(price_value("£12"), Some(12.0));
        assert_eq!(price_value("39.99"), None);
    }

    #[test]
    fn test_rating_count_line() {
        assert!(is_rating_count_line("(12)"));
        assert!(!is_rating_count_line("12"));
        assert!(!is_rating_count_line("(4.5)"));
        assert_eq!(rating_count("(12)"), Some(12));
        assert_eq!(rating_count("(99999999999)"), None);
        assert_eq!(rating_count("n/a"), None);
    }

    #[test]
    fn test_is_noise() {
        let rules = CatalogRules::default();
        assert!(rules.is_noise("Catalog"));
        assert!(rules.is_noise("LOG IN"));
        assert!(rules.is_noise("Data Engineering"));
        assert!(rules.is_noise(","));
        assert!(rules.is_noise(" | "));
        assert!(!rules.is_noise("Kafka in Action"));
    }

    #[test]
    fn test_looks_like_title() {
        let rules = CatalogRules::default();
        assert!(rules.looks_like_title("Kafka in Action"));
        assert!(rules.looks_like_title("Grokking Algorithms, Second Edition"));

        // Too short
        assert!(!rules.looks_like_title("Rust"));
        // Single alphabetic word
        assert!(!rules.looks_like_title("Bestsellers"));
        // Single word with digits is still a candidate
        assert!(rules.looks_like_title("Web3Book"));
        // Shapes reserved for other fields
        assert!(!rules.looks_like_title("2021"));
        assert!(!rules.looks_like_title("$39.99"));
        assert!(!rules.looks_like_title("(12345)"));
        // Denylisted
        assert!(!rules.looks_like_title("Software Development"));
    }

    #[test]
    fn test_custom_rules() {
        let rules = CatalogRules::with_noise(["Weekly Deals", "  Sign Up "]);
        assert!(rules.is_noise("weekly deals"));
        assert!(rules.is_noise("SIGN UP"));
        assert!(!rules.is_noise("Catalog"));
        assert!(!rules.looks_like_title("Weekly Deals"));
        assert_eq!(rules.year_window, 7);
        assert_eq!(rules.price_window, 6);
    }

    #[test]
    fn test_rules_from_toml() {
        let toml = r#"
            noise = ["Deals", "Gift Cards"]
            year_window = 4
        "#;
        let rules: CatalogRules = toml::from_str::<CatalogRules>(toml).unwrap().normalized();
        assert!(rules.is_noise("gift cards"));
        assert_eq!(rules.year_window, 4);
        assert_eq!(rules.price_window, 6);
        assert_eq!(rules.min_title_len, 6);
    }
}
