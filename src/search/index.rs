// src/search/index.rs

//! Exportable keyword index over the guide corpus.
//!
//! Builds a static inverted index mapping keywords to document ids, the
//! documented scaling path for the live substring search. The live query
//! path never consults it; it is built once at corpus load and exported as
//! `index.json` for external consumers.
//!
//! Example: `{"宿舍": ["dormitory:a_dorm", "page:home/faq"]}`

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::models::{CampusData, FacilityKind, FacilityRecord, GuideCategory};

/// Configuration for index generation.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Minimum token length in characters (default: 2)
    pub min_token_length: usize,
    /// Maximum tokens per document (default: 50)
    pub max_tokens_per_doc: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            min_token_length: 2,
            max_tokens_per_doc: 50,
        }
    }
}

/// Inverted keyword index.
///
/// Maps normalized keywords to sorted lists of document ids.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TokenIndex {
    /// Version for cache busting
    pub version: u32,
    /// Total number of indexed documents
    pub doc_count: usize,
    /// Total number of unique tokens
    pub token_count: usize,
    /// The inverted index: keyword -> list of document ids
    pub index: HashMap<String, Vec<String>>,
}

/// Builder for constructing a token index.
pub struct IndexBuilder {
    config: IndexConfig,
    index: HashMap<String, HashSet<String>>,
    doc_count: usize,
}

impl IndexBuilder {
    /// Create a new index builder with default configuration.
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    /// Create a new index builder with custom configuration.
    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            config,
            index: HashMap::new(),
            doc_count: 0,
        }
    }

    /// Add every page of a guide category to the index.
    pub fn add_category(&mut self, category: &GuideCategory) {
        for page in &category.pages {
            let doc_id = format!("page:{}/{}", category.key, page.page_key);
            let mut text = page.title.clone();
            page.content.flatten_into(&mut text);
            self.add_document(doc_id, &text);
        }
    }

    /// Add a facility record to the index.
    pub fn add_facility(&mut self, kind: FacilityKind, record: &FacilityRecord) {
        let doc_id = format!("{}:{}", kind.as_str(), record.id);
        self.add_document(doc_id, &record.searchable_text());
    }

    fn add_document(&mut self, doc_id: String, text: &str) {
        self.doc_count += 1;

        let mut tokens = self.tokenize(text);
        tokens.truncate(self.config.max_tokens_per_doc);

        for token in tokens {
            self.index.entry(token).or_default().insert(doc_id.clone());
        }
    }

    /// Build the final index.
    pub fn build(self) -> TokenIndex {
        let token_count = self.index.len();
        let index: HashMap<String, Vec<String>> = self
            .index
            .into_iter()
            .map(|(k, v)| {
                let mut ids: Vec<_> = v.into_iter().collect();
                ids.sort(); // Deterministic output
                (k, ids)
            })
            .collect();

        TokenIndex {
            version: 1,
            doc_count: self.doc_count,
            token_count,
            index,
        }
    }

    /// Tokenize a string into normalized keywords.
    ///
    /// UAX#29 segmentation treats every Han ideograph as its own word, which
    /// would drop all Chinese tokens under the length filter. Contiguous Han
    /// runs are therefore kept as single tokens; everything else goes
    /// through unicode word segmentation.
    fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = text.to_lowercase();
        let mut tokens = Vec::new();

        let mut han_run = String::new();
        let mut rest = String::new();
        for c in normalized.chars() {
            if is_han(c) {
                if !rest.is_empty() {
                    self.segment_into(&rest, &mut tokens);
                    rest.clear();
                }
                han_run.push(c);
            } else {
                if !han_run.is_empty() {
                    self.push_token(std::mem::take(&mut han_run), &mut tokens);
                }
                rest.push(c);
            }
        }
        if !han_run.is_empty() {
            self.push_token(han_run, &mut tokens);
        }
        if !rest.is_empty() {
            self.segment_into(&rest, &mut tokens);
        }

        tokens
    }

    /// Segment non-Han text with unicode word boundaries.
    fn segment_into(&self, text: &str, tokens: &mut Vec<String>) {
        for word in text.unicode_words() {
            self.push_token(word.to_string(), tokens);
        }
    }

    fn push_token(&self, token: String, tokens: &mut Vec<String>) {
        if token.chars().count() >= self.config.min_token_length && !is_stopword(&token) {
            tokens.push(token);
        }
    }
}

/// Whether a character is a Han ideograph (CJK Unified Ideographs blocks).
fn is_han(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}')
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a word is a common stopword (Chinese/English).
fn is_stopword(word: &str) -> bool {
    const STOPWORDS: &[&str] = &[
        // Chinese function words
        "的", "了", "和", "是", "在", "有", "与", "及", "或", "等", "可以", "进行", "请",
        // English common words
        "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
        "do", "does", "did", "will", "would", "could", "should", "may", "might", "can", "must",
        "shall", "of", "to", "in", "for", "on", "with", "at", "by", "from", "as", "or", "and",
        "but", "if", "then", "so", "than", // Common URL artifacts
        "http", "https", "www", "com", "cn", "html",
    ];
    STOPWORDS.contains(&word)
}

/// Build a token index over the full corpus.
pub fn build_index(categories: &[GuideCategory], campus: &CampusData) -> TokenIndex {
    let mut builder = IndexBuilder::new();
    for category in categories {
        builder.add_category(category);
    }
    for record in &campus.dormitories {
        builder.add_facility(FacilityKind::Dormitory, record);
    }
    for record in &campus.canteens {
        builder.add_facility(FacilityKind::Canteen, record);
    }
    builder.build()
}
