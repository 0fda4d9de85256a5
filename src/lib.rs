//! book-crawler - Book catalog and product page scraper CLI
//!
//! Rebuilds structured book records (title, authors, year, rating, price)
//! from bookseller catalog listings and product pages.

pub mod books;
pub mod commands;
pub mod config;
pub mod filters;
pub mod format;

pub use books::{parse_catalog, parse_product, BookRecord, CatalogRules, Rating};
pub use config::Config;
