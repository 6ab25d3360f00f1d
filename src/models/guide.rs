// src/models/guide.rs

//! Guide category and page data structures.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};

/// A top-level guide category containing an ordered list of pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideCategory {
    /// Unique category key (e.g., "home", "campus-life")
    pub key: String,

    /// Display title
    pub title: String,

    /// Icon identifier for the menu
    pub icon: String,

    /// Pages in display order
    #[serde(default)]
    pub pages: Vec<GuidePage>,
}

/// A single guide page with type-dependent structured content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidePage {
    /// Page key, unique within its category
    pub page_key: String,

    /// Display title
    pub title: String,

    /// Typed content payload
    #[serde(flatten)]
    pub content: PageContent,
}

/// Variant content payload, discriminated by the page `type` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "structuredContent", rename_all = "kebab-case")]
pub enum PageContent {
    /// Question/answer list
    Faq { items: Vec<FaqItem> },

    /// Club and organization listings
    Clubs(ClubsContent),

    /// Free-form nested sections rendered by the template dispatcher
    Plain(Value),

    /// Campus query tool page (free-form payload)
    CampusQueryTool(Value),

    /// Campus-specific page (free-form payload)
    CampusSpecific(Value),
}

/// A single FAQ entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqItem {
    /// Question text
    pub q: String,

    /// Answer text
    pub a: String,
}

/// Content of a clubs page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubsContent {
    /// Introductory paragraph
    #[serde(default)]
    pub introduction: String,

    /// Club groups in display order
    #[serde(default)]
    pub clubs: Vec<ClubGroup>,

    /// Student organization block
    #[serde(default)]
    pub organizations: Option<Organizations>,
}

/// A group of clubs at one level (e.g., university-level, college-level).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubGroup {
    /// Grouping level
    pub level: i32,

    /// Group label
    pub label: String,

    /// Club names
    #[serde(default)]
    pub list: Vec<String>,
}

/// Student organizations block on a clubs page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organizations {
    pub title: String,
    pub content: String,
}

impl PageContent {
    /// Append every human-readable string in this content to `out`,
    /// space-separated, in document order.
    pub fn flatten_into(&self, out: &mut String) {
        match self {
            PageContent::Faq { items } => {
                for item in items {
                    push_text(out, &item.q);
                    push_text(out, &item.a);
                }
            }
            PageContent::Clubs(clubs) => {
                push_text(out, &clubs.introduction);
                for group in &clubs.clubs {
                    push_text(out, &group.label);
                    for name in &group.list {
                        push_text(out, name);
                    }
                }
                if let Some(orgs) = &clubs.organizations {
                    push_text(out, &orgs.title);
                    push_text(out, &orgs.content);
                }
            }
            PageContent::Plain(value)
            | PageContent::CampusQueryTool(value)
            | PageContent::CampusSpecific(value) => flatten_value(value, out),
        }
    }
}

/// Recursively collect string leaves of a free-form JSON value.
///
/// Object keys are skipped; only values contribute searchable text.
pub fn flatten_value(value: &Value, out: &mut String) {
    match value {
        Value::String(s) => push_text(out, s),
        Value::Array(items) => {
            for item in items {
                flatten_value(item, out);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                flatten_value(item, out);
            }
        }
        Value::Number(n) => push_text(out, &n.to_string()),
        Value::Bool(_) | Value::Null => {}
    }
}

fn push_text(out: &mut String, text: &str) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(trimmed);
}

/// Validate loaded guide data: category keys unique, page keys unique
/// within each category.
pub fn validate_guide(categories: &[GuideCategory]) -> Result<()> {
    let mut seen_categories = std::collections::HashSet::new();
    for category in categories {
        if !seen_categories.insert(category.key.as_str()) {
            return Err(AppError::validation(format!(
                "Duplicate category key '{}'",
                category.key
            )));
        }
        let mut seen_pages = std::collections::HashSet::new();
        for page in &category.pages {
            if !seen_pages.insert(page.page_key.as_str()) {
                return Err(AppError::validation(format!(
                    "Duplicate page key '{}' in category '{}'",
                    page.page_key, category.key
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn faq_page() -> GuidePage {
        GuidePage {
            page_key: "faq".to_string(),
            title: "常见问题".to_string(),
            content: PageContent::Faq {
                items: vec![FaqItem {
                    q: "宿舍几点关门?".to_string(),
                    a: "晚上11点。".to_string(),
                }],
            },
        }
    }

    #[test]
    fn test_page_deserializes_tagged_content() {
        let data = json!({
            "pageKey": "faq",
            "title": "常见问题",
            "type": "faq",
            "structuredContent": { "items": [{"q": "问", "a": "答"}] }
        });
        let page: GuidePage = serde_json::from_value(data).unwrap();
        assert_eq!(page.page_key, "faq");
        match page.content {
            PageContent::Faq { items } => assert_eq!(items.len(), 1),
            other => panic!("expected faq content, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_page_roundtrip() {
        let data = json!({
            "pageKey": "intro",
            "title": "新生指南",
            "type": "plain",
            "structuredContent": { "sections": [{"heading": "报到", "steps": ["交材料"]}] }
        });
        let page: GuidePage = serde_json::from_value(data.clone()).unwrap();
        assert_eq!(serde_json::to_value(&page).unwrap(), data);
    }

    #[test]
    fn test_flatten_faq_content() {
        let page = faq_page();
        let mut text = String::new();
        page.content.flatten_into(&mut text);
        assert_eq!(text, "宿舍几点关门? 晚上11点。");
    }

    #[test]
    fn test_flatten_skips_object_keys() {
        let value = json!({ "link": "https://example.com", "points": ["A", "B"] });
        let mut text = String::new();
        flatten_value(&value, &mut text);
        assert!(text.contains("https://example.com"));
        assert!(text.contains("A B"));
        assert!(!text.contains("points"));
    }

    #[test]
    fn test_validate_rejects_duplicate_page_keys() {
        let categories = vec![GuideCategory {
            key: "home".to_string(),
            title: "首页".to_string(),
            icon: "home".to_string(),
            pages: vec![faq_page(), faq_page()],
        }];
        assert!(validate_guide(&categories).is_err());
    }

    #[test]
    fn test_validate_accepts_unique_keys() {
        let categories = vec![
            GuideCategory {
                key: "home".to_string(),
                title: "首页".to_string(),
                icon: "home".to_string(),
                pages: vec![faq_page()],
            },
            GuideCategory {
                key: "life".to_string(),
                title: "校园生活".to_string(),
                icon: "life".to_string(),
                pages: vec![],
            },
        ];
        assert!(validate_guide(&categories).is_ok());
    }
}
