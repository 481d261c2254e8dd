//! Hashtag extraction and canonicalization.
//!
//! A canonical tag is a non-empty string over `[a-z0-9_]`. Every tag that
//! enters the system, whether scanned from post text, typed into an explicit
//! tag field, or supplied as a filter, goes through [`normalize`], so
//! `#Music`, `#MUSIC!!` and `music` all land on the key `music`.

use std::collections::HashSet;

fn is_tag_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

/// Canonicalize a raw tag token.
///
/// Strips every `#`, trims, lowercases, and drops any character outside
/// `[a-z0-9_]`. Returns `None` when nothing is left.
pub fn normalize(raw: &str) -> Option<String> {
    let tag: String = raw
        .replace('#', "")
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| is_tag_char(*c))
        .collect();
    (!tag.is_empty()).then_some(tag)
}

/// Scan free text for `#tags`.
///
/// Splits on whitespace, keeps tokens that start with `#` and have at least
/// one more character, normalizes them, and removes duplicates while keeping
/// first-seen order.
pub fn extract_and_dedupe(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.split_whitespace()
        .filter(|token| token.starts_with('#') && token.len() > 1)
        .filter_map(normalize)
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// Fold an explicit tag field into the post body.
///
/// Every tag found in `explicit` is appended to `body` as a `#tag` token,
/// even when the body already mentions it, so the post's hashtags stay
/// derivable from its content alone. Without usable explicit tags the body
/// is returned unchanged.
pub fn compose_content(body: &str, explicit: Option<&str>) -> String {
    let extra: Vec<String> = explicit
        .map(extract_and_dedupe)
        .unwrap_or_default()
        .into_iter()
        .map(|tag| format!("#{tag}"))
        .collect();

    if extra.is_empty() {
        body.to_string()
    } else if body.trim().is_empty() {
        extra.join(" ")
    } else {
        format!("{body} {}", extra.join(" "))
    }
}
