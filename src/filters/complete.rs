//! Completeness filter.

use super::Filter;
use crate::books::BookRecord;

/// Keeps only records that carry authors, a year and a price.
pub struct CompleteFilter;

impl CompleteFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CompleteFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for CompleteFilter {
    fn matches(&self, record: &BookRecord) -> bool {
        record.is_complete()
    }

    fn description(&self) -> String {
        "Complete records only".to_string()
    }
}
