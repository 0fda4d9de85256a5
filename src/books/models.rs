//! Data models for extracted book records.

use serde::{Serialize, Serializer};

/// A book extracted from a catalog listing or a product page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookRecord {
    /// Work title, never empty
    pub title: String,
    /// Canonical comma-separated author names
    pub authors: Option<String>,
    /// Four-digit publication year
    pub year: Option<u16>,
    /// Star rating or review count, depending on the source page
    pub star_rating: Option<Rating>,
    /// Price with the currency symbol stripped
    pub price: Option<f64>,
    /// Page the record was extracted from
    pub source_url: String,
}

impl BookRecord {
    /// Creates a record with only the required fields set.
    pub fn new(title: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors: None,
            year: None,
            star_rating: None,
            price: None,
            source_url: source_url.into(),
        }
    }

    /// Returns the rating as a bare float if available.
    pub fn rating_value(&self) -> Option<f64> {
        self.star_rating.map(|r| r.value())
    }

    /// True when every optional field the catalog pipeline requires is present.
    pub fn is_complete(&self) -> bool {
        self.authors.is_some() && self.year.is_some() && self.price.is_some()
    }
}

/// The `star_rating` signal.
///
/// Product pages publish an average score while catalog listings only show how
/// many ratings a title has. Both end up in the same output column, so the
/// variant keeps track of which one a record actually carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    /// Average score in `[0, 5]`
    Stars(f64),
    /// Number of ratings shown next to a catalog entry
    Count(u32),
}

impl Rating {
    /// Returns the value as a float, whichever kind it is.
    pub fn value(self) -> f64 {
        match self {
            Rating::Stars(stars) => stars,
            Rating::Count(count) => f64::from(count),
        }
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}
