//! CLI command implementations.

pub mod catalog;
pub mod product;

pub use catalog::CatalogCommand;
pub use product::ProductCommand;

use anyhow::{bail, Result};

/// Picks the URLs given on the command line, falling back to the configured list.
fn resolve_urls(cli_urls: &[String], configured: &[String], kind: &str) -> Result<Vec<String>> {
    let source = if cli_urls.is_empty() { configured } else { cli_urls };
    let urls: Vec<String> = source
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect();

    if urls.is_empty() {
        bail!(
            "No {} URLs given. Pass them as arguments or set {}_urls in the config file.",
            kind,
            kind
        );
    }

    Ok(urls)
}
