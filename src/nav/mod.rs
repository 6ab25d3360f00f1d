// src/nav/mod.rs

//! Navigation tree derived from the guide data.
//!
//! A read-only structural index used to build the sidebar menu and to
//! resolve category/page key pairs to scroll targets. Built once at boot;
//! never mutated.

use crate::models::GuideCategory;
use crate::search::text::escape_html;

/// One category entry in the menu.
#[derive(Debug, Clone)]
pub struct NavCategory {
    pub key: String,
    pub title: String,
    pub icon: String,
    pub pages: Vec<NavPage>,
}

/// One page link in the menu.
#[derive(Debug, Clone)]
pub struct NavPage {
    pub key: String,
    pub title: String,
}

/// Derived, read-only structural index over the guide data.
#[derive(Debug, Clone, Default)]
pub struct NavigationTree {
    categories: Vec<NavCategory>,
}

impl NavigationTree {
    /// Build the tree from loaded guide categories, preserving order.
    pub fn build(categories: &[GuideCategory]) -> Self {
        let categories = categories
            .iter()
            .map(|category| NavCategory {
                key: category.key.clone(),
                title: category.title.clone(),
                icon: category.icon.clone(),
                pages: category
                    .pages
                    .iter()
                    .map(|page| NavPage {
                        key: page.page_key.clone(),
                        title: page.title.clone(),
                    })
                    .collect(),
            })
            .collect();
        Self { categories }
    }

    /// Menu entries in display order.
    pub fn categories(&self) -> &[NavCategory] {
        &self.categories
    }

    /// Whether the key pair names an existing page.
    pub fn contains(&self, category_key: &str, page_key: &str) -> bool {
        self.categories
            .iter()
            .find(|c| c.key == category_key)
            .is_some_and(|c| c.pages.iter().any(|p| p.key == page_key))
    }

    /// Resolve a key pair to its scroll target anchor.
    pub fn resolve(&self, category_key: &str, page_key: &str) -> Option<String> {
        self.contains(category_key, page_key)
            .then(|| format!("page-{category_key}-{page_key}"))
    }

    /// Render the sidebar menu, marking the active page link.
    pub fn render_menu(&self, active: Option<(&str, &str)>) -> String {
        let mut out = String::from("<nav class=\"sidebar-nav\">");
        for category in &self.categories {
            out.push_str(&format!(
                "<div class=\"nav-category\" data-category-key=\"{key}\">\
                 <span class=\"nav-icon\">{icon}</span>\
                 <span class=\"nav-title\">{title}</span>",
                key = escape_html(&category.key),
                icon = escape_html(&category.icon),
                title = escape_html(&category.title),
            ));
            out.push_str("<ul class=\"nav-pages\">");
            for page in &category.pages {
                let is_active =
                    active == Some((category.key.as_str(), page.key.as_str()));
                out.push_str(&format!(
                    "<li class=\"nav-link{active}\" data-target=\"page-{ckey}-{pkey}\">{title}</li>",
                    active = if is_active { " active" } else { "" },
                    ckey = escape_html(&category.key),
                    pkey = escape_html(&page.key),
                    title = escape_html(&page.title),
                ));
            }
            out.push_str("</ul></div>");
        }
        out.push_str("</nav>");
        out
    }
}
