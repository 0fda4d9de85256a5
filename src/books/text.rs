//! HTML to text: line streams, element text, and embedded JSON-LD blocks.

use crate::books::selectors::product;
use scraper::{ElementRef, Html};
use serde_json::Value;
use tracing::debug;

/// Elements whose text is never visible on the page.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Converts an HTML document into trimmed, non-empty text lines in reading order.
pub fn lines_of(html: &str) -> Vec<String> {
    document_lines(&Html::parse_document(html))
}

/// Line stream of an already parsed document.
pub fn document_lines(document: &Html) -> Vec<String> {
    let mut lines = Vec::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor.value().as_element().is_some_and(|e| HIDDEN_ELEMENTS.contains(&e.name()))
        });
        if hidden {
            continue;
        }

        lines.extend(
            text.split('\n').map(str::trim).filter(|line| !line.is_empty()).map(String::from),
        );
    }

    lines
}

/// Text of an element with all whitespace runs collapsed to single spaces.
pub fn element_text(element: ElementRef) -> String {
    element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}

/// Collapses internal whitespace runs to single spaces.
pub fn squash_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses every JSON-LD block on the page.
///
/// A top-level array contributes each of its objects; anything that is not an
/// object, and any block that fails to parse, is ignored.
pub fn json_ld_blocks(document: &Html) -> Vec<Value> {
    let mut blocks = Vec::new();

    for script in document.select(&product::JSON_LD) {
        let content = script.text().collect::<String>();
        let content = content.trim();
        if content.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(content) {
            Ok(Value::Array(items)) => blocks.extend(items.into_iter().filter(Value::is_object)),
            Ok(value @ Value::Object(_)) => blocks.push(value),
            Ok(_) => {}
            Err(e) => debug!("Skipping malformed JSON-LD block: {}", e),
        }
    }

    blocks
}
