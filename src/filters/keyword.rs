//! Keyword-based title filtering.

use super::Filter;
use crate::books::BookRecord;

/// Filters records by keywords in the title.
pub struct KeywordFilter {
    /// Keywords that must appear in the title.
    required: Vec<String>,
    /// Keywords that must NOT appear in the title.
    excluded: Vec<String>,
}

impl KeywordFilter {
    /// Creates a new keyword filter.
    pub fn new(required: Vec<String>, excluded: Vec<String>) -> Self {
        Self {
            required: required.into_iter().map(|k| k.to_lowercase()).collect(),
            excluded: excluded.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Creates a filter with only required keywords.
    pub fn required(keywords: Vec<String>) -> Self {
        Self::new(keywords, Vec::new())
    }

    /// Creates a filter with only excluded keywords.
    pub fn excluded(keywords: Vec<String>) -> Self {
        Self::new(Vec::new(), keywords)
    }
}

impl Filter for KeywordFilter {
    fn matches(&self, record: &BookRecord) -> bool {
        let title = record.title.to_lowercase();

        self.required.iter().all(|k| title.contains(k.as_str()))
            && !self.excluded.iter().any(|k| title.contains(k.as_str()))
    }

    fn description(&self) -> String {
        let mut parts = Vec::new();

        if !self.required.is_empty() {
            parts.push(format!("Must contain: {}", self.required.join(", ")));
        }

        if !self.excluded.is_empty() {
            parts.push(format!("Must not contain: {}", self.excluded.join(", ")));
        }

        if parts.is_empty() {
            "Keywords: any".to_string()
        } else {
            parts.join("; ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(title: &str) -> BookRecord {
        BookRecord::new(title, "https://www.manning.com/catalog")
    }

    #[test]
    fn test_required_keywords() {
        let filter = KeywordFilter::required(vec!["data".to_string(), "python".to_string()]);

        assert!(filter.matches(&make_record("Data Engineering with Python")));
        assert!(filter.matches(&make_record("PYTHON FOR DATA ANALYSIS")));
        assert!(!filter.matches(&make_record("Data Pipelines Pocket Reference")));
        assert!(!filter.matches(&make_record("Python Crash Course")));
    }

    #[test]
    fn test_excluded_keywords() {
        let filter = KeywordFilter::excluded(vec!["cookbook".to_string(), "pocket".to_string()]);

        assert!(filter.matches(&make_record("Kafka in Action")));
        assert!(!filter.matches(&make_record("Spark Cookbook")));
        assert!(!filter.matches(&make_record("Data Pipelines Pocket Reference")));
    }

    #[test]
    fn test_both_required_and_excluded() {
        let filter = KeywordFilter::new(vec!["kafka".to_string()], vec!["streams".to_string()]);

        assert!(filter.matches(&make_record("Kafka in Action")));
        assert!(!filter.matches(&make_record("Designing Data-Intensive Applications")));
        assert!(!filter.matches(&make_record("Kafka Streams in Action")));
    }

    #[test]
    fn test_empty_keywords() {
        let filter = KeywordFilter::new(Vec::new(), Vec::new());
        assert!(filter.matches(&make_record("Anything at all")));
    }

    #[test]
    fn test_partial_match() {
        let filter = KeywordFilter::required(vec!["engineer".to_string()]);
        assert!(filter.matches(&make_record("Data Engineering with Python")));
    }

    #[test]
    fn test_description() {
        let filter = KeywordFilter::new(vec!["Kafka".to_string()], vec!["streams".to_string()]);
        let desc = filter.description();
        assert!(desc.contains("Must contain: kafka"));
        assert!(desc.contains("Must not contain: streams"));

        assert_eq!(KeywordFilter::new(Vec::new(), Vec::new()).description(), "Keywords: any");
    }
}
