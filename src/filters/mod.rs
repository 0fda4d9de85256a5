//! Record filtering system with composable filters.

pub mod complete;
pub mod keyword;
pub mod price;

use crate::books::BookRecord;
use crate::config::Config;

pub use complete::CompleteFilter;
pub use keyword::KeywordFilter;
pub use price::PriceFilter;

/// Trait for filtering book records.
pub trait Filter: Send + Sync {
    /// Returns true if the record passes the filter.
    fn matches(&self, record: &BookRecord) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a record passes all filters.
    pub fn matches(&self, record: &BookRecord) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }

    /// Filters a collection of records, keeping their order.
    pub fn apply(&self, records: Vec<BookRecord>) -> Vec<BookRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain from configuration.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Starts a builder with the price and keyword filters of a config.
    ///
    /// Completeness is left to the caller, since only catalog listings use it.
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .price_range(config.min_price, config.max_price)
            .keywords(config.keywords.clone())
            .exclude_keywords(config.exclude_keywords.clone())
    }

    /// Adds a completeness filter.
    pub fn complete(mut self, enabled: bool) -> Self {
        if enabled {
            self.chain.add(CompleteFilter::new());
        }
        self
    }

    /// Adds a price range filter.
    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        if min.is_some() || max.is_some() {
            self.chain.add(PriceFilter::new(min, max));
        }
        self
    }

    /// Adds required keywords filter.
    pub fn keywords(mut self, keywords: Vec<String>) -> Self {
        if !keywords.is_empty() {
            self.chain.add(KeywordFilter::required(keywords));
        }
        self
    }

    /// Adds excluded keywords filter.
    pub fn exclude_keywords(mut self, keywords: Vec<String>) -> Self {
        if !keywords.is_empty() {
            self.chain.add(KeywordFilter::excluded(keywords));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(title: &str, price: Option<f64>, complete: bool) -> BookRecord {
        let mut record = BookRecord::new(title, "https://www.manning.com/catalog");
        record.price = price;
        if complete {
            record.authors = Some("Dylan Scott".to_string());
            record.year = Some(2022);
        }
        record
    }

    // FilterChain tests

    #[test]
    fn test_filter_chain_new() {
        let chain = FilterChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn test_filter_chain_default() {
        let chain = FilterChain::default();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_filter_chain() {
        let mut chain = FilterChain::new();
        chain.add(PriceFilter::new(Some(10.0), Some(50.0)));
        chain.add(CompleteFilter::new());

        assert_eq!(chain.len(), 2);

        assert!(chain.matches(&make_record("Kafka in Action", Some(39.99), true)));
        // Price too low
        assert!(!chain.matches(&make_record("Kafka in Action", Some(5.0), true)));
        // Missing authors and year
        assert!(!chain.matches(&make_record("Kafka in Action", Some(39.99), false)));
    }

    #[test]
    fn test_filter_chain_empty_matches_all() {
        let chain = FilterChain::new();
        assert!(chain.matches(&make_record("Anything", None, false)));
    }

    #[test]
    fn test_filter_chain_apply_keeps_order() {
        let mut chain = FilterChain::new();
        chain.add(PriceFilter::new(Some(20.0), None));

        let records = vec![
            make_record("First Book", Some(30.0), true),
            make_record("Cheap Book", Some(10.0), true),
            make_record("Third Book", Some(50.0), true),
        ];

        let filtered = chain.apply(records);
        let titles: Vec<&str> = filtered.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["First Book", "Third Book"]);
    }

    #[test]
    fn test_filter_chain_descriptions() {
        let mut chain = FilterChain::new();
        chain.add(CompleteFilter::new());
        chain.add(PriceFilter::range(10.0, 50.0));
        chain.add(KeywordFilter::required(vec!["kafka".to_string()]));

        let descriptions = chain.descriptions();
        assert_eq!(descriptions.len(), 3);
        assert!(descriptions[0].contains("Complete"));
        assert!(descriptions[1].contains("Price"));
        assert!(descriptions[2].contains("kafka"));
    }

    // FilterChainBuilder tests

    #[test]
    fn test_filter_chain_builder() {
        let chain = FilterChainBuilder::new()
            .complete(true)
            .price_range(Some(10.0), Some(100.0))
            .keywords(vec!["data".to_string()])
            .exclude_keywords(vec!["cookbook".to_string()])
            .build();

        assert_eq!(chain.len(), 4);
    }

    #[test]
    fn test_filter_chain_builder_no_filters_when_disabled() {
        let chain = FilterChainBuilder::new()
            .complete(false)
            .price_range(None, None)
            .keywords(Vec::new())
            .exclude_keywords(Vec::new())
            .build();

        assert!(chain.is_empty());
    }

    #[test]
    fn test_filter_chain_builder_from_default_config() {
        let chain = FilterChainBuilder::from_config(&Config::default()).build();
        assert!(chain.is_empty());
        assert!(chain.matches(&make_record("Kafka in Action", None, false)));

        let config = Config::default();
        let chain =
            FilterChainBuilder::from_config(&config).complete(config.require_complete).build();
        assert_eq!(chain.len(), 1);
        assert!(!chain.matches(&make_record("Kafka in Action", None, true)));
    }

    #[test]
    fn test_filter_chain_builder_from_config() {
        let config = Config {
            max_price: Some(40.0),
            exclude_keywords: vec!["Cookbook".to_string()],
            ..Config::default()
        };
        let chain = FilterChainBuilder::from_config(&config).build();
        assert_eq!(chain.len(), 2);

        assert!(chain.matches(&make_record("Data Pipelines Pocket Reference", None, false)));
        assert!(!chain.matches(&make_record("Spark Cookbook", Some(20.0), true)));
        assert!(!chain.matches(&make_record("Designing Data Systems", Some(59.99), true)));
    }

    #[test]
    fn test_all_filters_combined() {
        let chain = FilterChainBuilder::new()
            .complete(true)
            .price_range(Some(20.0), Some(100.0))
            .keywords(vec!["data".to_string()])
            .exclude_keywords(vec!["cookbook".to_string()])
            .build();

        assert!(chain.matches(&make_record("Data Engineering with Python", Some(44.99), true)));
        assert!(!chain.matches(&make_record("Data Engineering with Python", Some(44.99), false)));
        assert!(!chain.matches(&make_record("Data Engineering with Python", Some(9.99), true)));
        assert!(!chain.matches(&make_record("Kafka in Action", Some(44.99), true)));
        assert!(!chain.matches(&make_record("Data Cookbook", Some(44.99), true)));
    }
}
