//! Author string validation and normalization.

use crate::books::selectors::authors::{AND, CAPITALIZED_WORD, NAME_LIST};
use crate::books::text::squash_whitespace;

/// Phrases that show up in promotional copy near bylines but never in names.
const BAD_AUTHOR_PHRASES: &[&str] = &[
    "free trial",
    "unsubscribe",
    "emails",
    "redeeming",
    "service",
    "privacy",
    "terms",
    "cookie",
    "newsletter",
    "consent",
];

/// Lowercase particles that belong to the surrounding name.
const NAME_CONNECTORS: &[&str] =
    &["de", "da", "del", "van", "von", "bin", "binti", "al", "el", "la", "le", "di", "du"];

const MAX_AUTHOR_LEN: usize = 80;

/// Decides whether free text is a plausible author byline.
pub fn is_plausible_author(candidate: &str) -> bool {
    let s = squash_whitespace(candidate);
    if s.is_empty() || s.chars().count() > MAX_AUTHOR_LEN {
        return false;
    }

    let lower = s.to_lowercase();
    if BAD_AUTHOR_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
        return false;
    }

    if !s.chars().any(|c| c.is_ascii_alphabetic()) {
        return false;
    }

    // Sentences, not names
    if s.matches('.').count() > 1 || s.matches(',').count() > 6 {
        return false;
    }

    NAME_LIST.is_match(&s) || CAPITALIZED_WORD.find_iter(&s).count() >= 2
}

/// Rewrites an author string as a comma-separated list of names.
///
/// Handles strings that are already comma separated, names joined by "and",
/// and several names run together without any delimiter. Returns `None` for
/// blank input.
pub fn normalize_authors(raw: &str) -> Option<String> {
    let s = squash_whitespace(raw);
    if s.is_empty() {
        return None;
    }

    if s.contains(',') {
        return join_comma_parts(&s);
    }

    let s = AND.replace_all(&s, ", ").into_owned();
    if s.contains(',') {
        return join_comma_parts(&s);
    }

    let tokens: Vec<&str> = s.split(' ').collect();
    if tokens.len() <= 2 {
        return Some(s);
    }

    let mut chunks: Vec<Vec<&str>> = Vec::new();
    let mut current = vec![tokens[0]];

    for &token in &tokens[1..] {
        if starts_new_name(token, &current) {
            chunks.push(std::mem::take(&mut current));
        }
        current.push(token);
    }
    chunks.push(current);

    if chunks.len() <= 1 {
        return Some(s);
    }

    Some(chunks.iter().map(|chunk| chunk.join(" ")).collect::<Vec<_>>().join(", "))
}

/// A capitalised token opens a new name once the current one has two tokens,
/// unless it is a connector or directly follows one ("de la Cruz").
fn starts_new_name(token: &str, current: &[&str]) -> bool {
    if is_connector(token) || current.last().is_some_and(|prev| is_connector(prev)) {
        return false;
    }
    let capitalized = token.chars().next().is_some_and(char::is_uppercase);
    capitalized && current.len() >= 2
}

fn is_connector(token: &str) -> bool {
    NAME_CONNECTORS.contains(&token.to_lowercase().as_str())
}

fn join_comma_parts(s: &str) -> Option<String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
