// src/search/text.rs

//! Text helpers shared by the search core: offset-stable case folding,
//! substring location, and HTML escaping.
//!
//! All matching works on `Vec<char>` so that byte-width differences between
//! ASCII and CJK text never skew window arithmetic. Folding maps each
//! character to a single lowercase character (the first character of its
//! lowercase expansion), which keeps folded offsets aligned 1:1 with the
//! original text.

/// Fold one character for case-insensitive comparison.
pub fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    lower.next().unwrap_or(c)
}

/// Fold a string into an offset-stable lowercase character sequence.
pub fn fold_chars(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

/// Find the first occurrence of `needle` in `haystack` at or after `from`,
/// both already folded. Returns the character offset.
pub fn find_folded(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (from..=haystack.len() - needle.len()).find(|&i| haystack[i..i + needle.len()] == *needle)
}

/// Escape HTML-unsafe characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
