// src/search/indexer.rs

//! In-memory search over guide pages and campus facilities.
//!
//! The corpus is small (tens of pages and facilities), so every query is a
//! linear scan over precomputed searchable-text blobs. No ranking, no
//! deduplication, no result cap.

use serde::Serialize;

use crate::models::{CampusData, FacilityKind, GuideCategory};
use crate::search::snippet;
use crate::search::text::{find_folded, fold_chars};

/// A single search hit, created fresh per query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    /// Display title of the matched page or facility
    pub title: String,

    /// Full searchable text, used for snippet extraction
    pub text: String,

    /// Whether this hit opens a facility detail view
    pub is_detail: bool,

    /// Category key for page hits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_key: Option<String>,

    /// Page key for page hits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_key: Option<String>,

    /// Facility kind for detail hits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_type: Option<FacilityKind>,

    /// Facility id for detail hits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_key: Option<String>,
}

impl SearchMatch {
    /// Highlighted snippet for this hit.
    pub fn snippet(&self, query: &str) -> String {
        snippet::render(&self.text, query)
    }
}

/// Precomputed searchable document for a guide page.
#[derive(Debug, Clone)]
struct PageDoc {
    category_key: String,
    page_key: String,
    title: String,
    text: String,
    folded: Vec<char>,
}

/// Precomputed searchable document for a facility record.
#[derive(Debug, Clone)]
struct FacilityDoc {
    id: String,
    campus_id: String,
    name: String,
    text: String,
    folded: Vec<char>,
}

/// Linear-scan substring search over the loaded corpus.
///
/// Pure with respect to queries: results depend only on the corpus snapshot,
/// the query text, and the selected campus.
pub struct SearchIndexer {
    pages: Vec<PageDoc>,
    dormitories: Vec<FacilityDoc>,
    canteens: Vec<FacilityDoc>,
}

impl SearchIndexer {
    /// Build searchable blobs from the loaded corpus.
    ///
    /// Page order follows category order, facility order follows the source
    /// record order; search results preserve both.
    pub fn build(categories: &[GuideCategory], campus: &CampusData) -> Self {
        let mut pages = Vec::new();
        for category in categories {
            for page in &category.pages {
                let mut text = page.title.trim().to_string();
                page.content.flatten_into(&mut text);
                let folded = fold_chars(&text);
                pages.push(PageDoc {
                    category_key: category.key.clone(),
                    page_key: page.page_key.clone(),
                    title: page.title.clone(),
                    text,
                    folded,
                });
            }
        }

        let facility_docs = |records: &[crate::models::FacilityRecord]| {
            records
                .iter()
                .map(|record| {
                    let text = record.searchable_text();
                    let folded = fold_chars(&text);
                    FacilityDoc {
                        id: record.id.clone(),
                        campus_id: record.campus_id.clone(),
                        name: record.name.clone(),
                        text,
                        folded,
                    }
                })
                .collect()
        };

        Self {
            pages,
            dormitories: facility_docs(&campus.dormitories),
            canteens: facility_docs(&campus.canteens),
        }
    }

    /// Number of searchable documents.
    pub fn doc_count(&self) -> usize {
        self.pages.len() + self.dormitories.len() + self.canteens.len()
    }

    /// Case-insensitive substring search.
    ///
    /// Result order: guide pages in category order, then dormitories, then
    /// canteens. Facilities are filtered to `selected_campus` before text
    /// matching, so a text match on another campus never appears.
    pub fn search(&self, query: &str, selected_campus: &str) -> Vec<SearchMatch> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        let needle = fold_chars(trimmed);

        let mut results = Vec::new();

        for page in &self.pages {
            if find_folded(&page.folded, &needle, 0).is_some() {
                results.push(SearchMatch {
                    title: page.title.clone(),
                    text: page.text.clone(),
                    is_detail: false,
                    category_key: Some(page.category_key.clone()),
                    page_key: Some(page.page_key.clone()),
                    detail_type: None,
                    detail_key: None,
                });
            }
        }

        for (kind, docs) in [
            (FacilityKind::Dormitory, &self.dormitories),
            (FacilityKind::Canteen, &self.canteens),
        ] {
            for doc in docs.iter().filter(|d| d.campus_id == selected_campus) {
                if find_folded(&doc.folded, &needle, 0).is_some() {
                    results.push(SearchMatch {
                        title: doc.name.clone(),
                        text: doc.text.clone(),
                        is_detail: true,
                        category_key: None,
                        page_key: None,
                        detail_type: Some(kind),
                        detail_key: Some(doc.id.clone()),
                    });
                }
            }
        }

        log::debug!(
            "search '{}' on campus '{}': {} hits",
            trimmed,
            selected_campus,
            results.len()
        );
        results
    }
}
