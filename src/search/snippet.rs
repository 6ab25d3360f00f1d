// src/search/snippet.rs

//! Snippet extraction and highlight injection.
//!
//! The window sizes are a fixed heuristic shared with the original product:
//! 30 characters of context before the first match and 70 after it. All
//! offsets are character offsets.

use crate::search::text::{escape_html, find_folded, fold_chars};

/// Characters of context kept before the match start.
const CONTEXT_BEFORE: usize = 30;

/// Characters of context kept after the match end.
const CONTEXT_AFTER: usize = 70;

/// Snippet length used when the query does not occur in the text.
const FALLBACK_LEN: usize = 100;

/// Extract the snippet window around the first case-insensitive occurrence
/// of `query` in `text`. Returns the raw (unescaped) excerpt.
pub fn extract(text: &str, query: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let folded = fold_chars(text);
    let needle = fold_chars(query);

    match find_folded(&folded, &needle, 0) {
        Some(pos) => {
            let start = pos.saturating_sub(CONTEXT_BEFORE);
            let end = (pos + needle.len() + CONTEXT_AFTER).min(chars.len());
            chars[start..end].iter().collect()
        }
        None => chars[..chars.len().min(FALLBACK_LEN)].iter().collect(),
    }
}

/// Escape `snippet` and wrap every case-insensitive occurrence of `query`
/// in `<mark>` tags. Escaping happens first; the tags wrap already-escaped
/// match text, so nothing is double-escaped.
pub fn highlight(snippet: &str, query: &str) -> String {
    let chars: Vec<char> = snippet.chars().collect();
    let folded = fold_chars(snippet);
    let needle = fold_chars(query);

    if needle.is_empty() {
        return escape_html(snippet);
    }

    let mut out = String::new();
    let mut cursor = 0;
    while let Some(pos) = find_folded(&folded, &needle, cursor) {
        let before: String = chars[cursor..pos].iter().collect();
        let matched: String = chars[pos..pos + needle.len()].iter().collect();
        out.push_str(&escape_html(&before));
        out.push_str("<mark>");
        out.push_str(&escape_html(&matched));
        out.push_str("</mark>");
        cursor = pos + needle.len();
    }
    let rest: String = chars[cursor..].iter().collect();
    out.push_str(&escape_html(&rest));
    out
}

/// Extract and highlight in one step.
pub fn render(text: &str, query: &str) -> String {
    highlight(&extract(text, query), query)
}
