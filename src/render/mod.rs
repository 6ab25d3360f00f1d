// src/render/mod.rs

//! Search result rendering.
//!
//! Maps match records to markup fragments. Each fragment carries the data
//! attributes needed to rebuild a `ResultSelection` when clicked, so page
//! hits and facility hits dispatch through the event bus identically.

use crate::search::text::escape_html;
use crate::search::SearchMatch;

/// Renders search results to markup fragments.
#[derive(Debug, Default)]
pub struct ResultRenderer;

impl ResultRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a result list for the given query.
    ///
    /// Zero results yields a single informational fragment containing the
    /// escaped query. The caller is responsible for not invoking this with
    /// an empty query (the live panel is hidden instead).
    pub fn render(&self, results: &[SearchMatch], query: &str) -> String {
        if results.is_empty() {
            return format!(
                "<div class=\"search-empty\">未找到与“{}”相关的内容</div>",
                escape_html(query)
            );
        }

        let mut out = String::new();
        for result in results {
            out.push_str(&self.render_item(result, query));
        }
        out
    }

    fn render_item(&self, result: &SearchMatch, query: &str) -> String {
        let attrs = if result.is_detail {
            format!(
                "data-is-detail=\"true\" data-detail-type=\"{}\" data-detail-key=\"{}\"",
                result
                    .detail_type
                    .map(|k| k.as_str())
                    .unwrap_or_default(),
                escape_html(result.detail_key.as_deref().unwrap_or_default()),
            )
        } else {
            format!(
                "data-is-detail=\"false\" data-category-key=\"{}\" data-page-key=\"{}\"",
                escape_html(result.category_key.as_deref().unwrap_or_default()),
                escape_html(result.page_key.as_deref().unwrap_or_default()),
            )
        };

        format!(
            "<div class=\"search-result-item\" {attrs}>\
             <div class=\"search-result-title\">{title}</div>\
             <div class=\"search-result-snippet\">{snippet}</div>\
             </div>",
            title = escape_html(&result.title),
            snippet = result.snippet(query),
        )
    }
}
