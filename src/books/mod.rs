//! Book extraction: page fetching, line classification, and the catalog and product parsers.

pub mod authors;
pub mod catalog;
pub mod classify;
pub mod client;
pub mod jsonld;
pub mod models;
pub mod product;
pub mod selectors;
pub mod text;

pub use authors::{is_plausible_author, normalize_authors};
pub use catalog::{parse_catalog, parse_catalog_with};
pub use classify::CatalogRules;
pub use client::{FetchError, Fetcher, HttpFetcher};
pub use models::{BookRecord, Rating};
pub use product::parse_product;
