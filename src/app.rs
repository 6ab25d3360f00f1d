// src/app.rs

//! Application composition root.
//!
//! `GuideApp` owns every component explicitly: the corpus snapshot, the
//! selected campus, the event bus, the search indexer, the navigation tree,
//! and the view coordinator. Nothing lives in module-level state, so the
//! whole core is constructible and testable in isolation.

use std::collections::HashMap;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::event::{AppEvent, EventBus, ResultSelection, ToastKind};
use crate::models::{CampusData, FacilityKind, GuideCategory, validate_guide};
use crate::nav::NavigationTree;
use crate::render::ResultRenderer;
use crate::search::{SearchIndexer, TokenIndex, build_index};
use crate::source::ContentSource;
use crate::storage::PrefsStore;
use crate::view::{ViewCoordinator, ViewEffect};

/// Outcome of a live-search keystroke.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutput {
    /// Empty or whitespace-only input: the live panel is hidden entirely,
    /// never shown with a "no results" message.
    Hidden,
    /// Rendered result fragments (or the "no results" fragment).
    Results(String),
}

/// The assembled guide application core.
pub struct GuideApp {
    config: Config,
    bus: EventBus,
    guide: Vec<GuideCategory>,
    campus: CampusData,
    selected_campus: String,
    indexer: SearchIndexer,
    token_index: TokenIndex,
    nav: NavigationTree,
    coordinator: ViewCoordinator,
    renderer: ResultRenderer,
    prefs: PrefsStore,
}

impl GuideApp {
    /// Load preferences and corpora, then assemble all components.
    ///
    /// Content failures degrade to empty corpora (the source contract), so
    /// boot itself never fails on content problems.
    pub async fn boot(config: Config, source: &dyn ContentSource) -> Self {
        let prefs = PrefsStore::new(config.paths.prefs_path(), &config.campus.default_id);
        let selected_campus = prefs.selected_campus();

        let guide = source.load_guide_data().await;
        let campus = source.load_campus_data().await;
        log::info!(
            "Loaded {} guide categories, {} dormitories, {} canteens (campus '{}')",
            guide.len(),
            campus.dormitories.len(),
            campus.canteens.len(),
            selected_campus
        );

        let indexer = SearchIndexer::build(&guide, &campus);
        log::debug!("Search corpus: {} documents", indexer.doc_count());
        let token_index = build_index(&guide, &campus);
        let nav = NavigationTree::build(&guide);

        Self {
            config,
            bus: EventBus::new(),
            guide,
            campus,
            selected_campus,
            indexer,
            token_index,
            nav,
            coordinator: ViewCoordinator::new(),
            renderer: ResultRenderer::new(),
            prefs,
        }
    }

    /// Handle one keystroke of live-search input.
    ///
    /// Each call fully supersedes the previous output; the final rendered
    /// state always reflects the most recent input.
    pub fn handle_search_input(&self, raw: &str) -> SearchOutput {
        let query = raw.trim();
        if query.is_empty() {
            return SearchOutput::Hidden;
        }
        let results = self.indexer.search(query, &self.selected_campus);
        SearchOutput::Results(self.renderer.render(&results, query))
    }

    /// Handle a click on a rendered search result.
    ///
    /// Publishes the click on the bus, routes it through the view
    /// coordinator, and publishes the resulting navigation event.
    pub fn handle_result_click(&mut self, attrs: &HashMap<String, String>) -> Vec<ViewEffect> {
        let selection = ResultSelection::from_attrs(attrs);
        self.bus
            .publish(&AppEvent::SearchResultClicked(selection.clone()));

        let effects = self
            .coordinator
            .result_selected(&selection, Some(&self.campus));

        if selection.is_detail {
            if let (Some(kind), Some(key)) = (
                selection.detail_type.as_deref().and_then(FacilityKind::parse),
                selection.detail_key,
            ) {
                self.bus.publish(&AppEvent::DetailShow { kind, key });
            }
        } else if let (Some(category_key), Some(page_key)) =
            (selection.category_key, selection.page_key)
        {
            if self.nav.resolve(&category_key, &page_key).is_none() {
                log::warn!("scroll request for unknown page {category_key}/{page_key}");
            }
            self.bus.publish(&AppEvent::NavRequestScroll {
                category_key,
                page_key,
            });
        }

        effects
    }

    /// Open a facility detail view directly.
    pub fn show_detail(&mut self, kind: FacilityKind, key: &str) -> Vec<ViewEffect> {
        let effects = self.coordinator.show_detail(kind, key, Some(&self.campus));
        self.bus.publish(&AppEvent::DetailShow {
            kind,
            key: key.to_string(),
        });
        effects
    }

    /// Close the detail view.
    pub fn hide_detail(&mut self) -> Vec<ViewEffect> {
        self.coordinator.hide_detail()
    }

    /// Change the selected campus, persisting the choice.
    ///
    /// Runs strictly outside query evaluation; the next search sees the new
    /// filter.
    pub fn select_campus(&mut self, campus_id: &str) -> Result<()> {
        if !self.campus.has_campus(campus_id) {
            self.bus.publish(&AppEvent::ToastShow {
                message: format!("未知校区: {campus_id}"),
                kind: ToastKind::Error,
            });
            return Err(AppError::validation(format!(
                "Unknown campus '{campus_id}'"
            )));
        }

        self.prefs.set_selected_campus(campus_id)?;
        self.selected_campus = campus_id.to_string();
        self.bus.publish(&AppEvent::ToastShow {
            message: "校区已切换".to_string(),
            kind: ToastKind::Success,
        });
        Ok(())
    }

    /// Validate configuration and both corpora.
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;
        validate_guide(&self.guide)?;
        self.campus.validate()?;
        Ok(())
    }

    /// Sidebar menu markup reflecting the active navigation pair.
    pub fn menu(&self) -> String {
        self.nav.render_menu(self.coordinator.active_nav())
    }

    /// Currently selected campus id.
    pub fn selected_campus(&self) -> &str {
        &self.selected_campus
    }

    /// The exportable keyword index built at boot.
    pub fn token_index(&self) -> &TokenIndex {
        &self.token_index
    }

    /// Navigation tree accessor.
    pub fn nav(&self) -> &NavigationTree {
        &self.nav
    }

    /// View coordinator accessor.
    pub fn coordinator(&self) -> &ViewCoordinator {
        &self.coordinator
    }

    /// Event bus accessor for registering consumers.
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Loaded guide categories.
    pub fn guide(&self) -> &[GuideCategory] {
        &self.guide
    }

    /// Loaded campus data.
    pub fn campus_data(&self) -> &CampusData {
        &self.campus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use crate::models::{Campus, FacilityRecord, GuidePage, PageContent};
    use crate::view::ActiveView;
    use async_trait::async_trait;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    struct FixtureSource {
        guide: Vec<GuideCategory>,
        campus: CampusData,
    }

    #[async_trait]
    impl ContentSource for FixtureSource {
        async fn load_guide_data(&self) -> Vec<GuideCategory> {
            self.guide.clone()
        }
        async fn load_campus_data(&self) -> CampusData {
            self.campus.clone()
        }
    }

    fn fixture() -> FixtureSource {
        FixtureSource {
            guide: vec![GuideCategory {
                key: "home".to_string(),
                title: "首页".to_string(),
                icon: "home".to_string(),
                pages: vec![GuidePage {
                    page_key: "home".to_string(),
                    title: "新生指南".to_string(),
                    content: PageContent::Plain(json!({"text": "欢迎来到校园"})),
                }],
            }],
            campus: CampusData {
                campuses: vec![
                    Campus {
                        id: "cangwu".to_string(),
                        name: "苍梧校区".to_string(),
                    },
                    Campus {
                        id: "tongguan".to_string(),
                        name: "通灌校区".to_string(),
                    },
                ],
                dormitories: vec![FacilityRecord {
                    id: "a_dorm".to_string(),
                    campus_id: "cangwu".to_string(),
                    name: "A区宿舍".to_string(),
                    summary: "四人间".to_string(),
                    image: String::new(),
                    details: vec![],
                }],
                canteens: vec![],
                colleges: vec![],
            },
        }
    }

    fn test_config(tmp: &TempDir) -> Config {
        let mut config = Config::default();
        config.paths.data_dir = tmp.path().to_string_lossy().into_owned();
        config
    }

    #[tokio::test]
    async fn test_boot_uses_default_campus_without_prefs() {
        let tmp = TempDir::new().unwrap();
        let app = GuideApp::boot(test_config(&tmp), &fixture()).await;
        assert_eq!(app.selected_campus(), "cangwu");
        assert!(app.validate().is_ok());
    }

    #[tokio::test]
    async fn test_empty_input_hides_panel() {
        let tmp = TempDir::new().unwrap();
        let app = GuideApp::boot(test_config(&tmp), &fixture()).await;
        assert_eq!(app.handle_search_input(""), SearchOutput::Hidden);
        assert_eq!(app.handle_search_input("   "), SearchOutput::Hidden);
    }

    #[tokio::test]
    async fn test_search_renders_results() {
        let tmp = TempDir::new().unwrap();
        let app = GuideApp::boot(test_config(&tmp), &fixture()).await;
        match app.handle_search_input("宿舍") {
            SearchOutput::Results(markup) => {
                assert!(markup.contains("data-detail-key=\"a_dorm\""));
                assert!(markup.contains("<mark>宿舍</mark>"));
            }
            SearchOutput::Hidden => panic!("expected results"),
        }
    }

    #[tokio::test]
    async fn test_result_click_routes_to_detail_and_publishes() {
        let tmp = TempDir::new().unwrap();
        let mut app = GuideApp::boot(test_config(&tmp), &fixture()).await;

        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            app.bus_mut().subscribe(EventKind::DetailShow, move |event| {
                if let AppEvent::DetailShow { key, .. } = event {
                    seen.borrow_mut().push(key.clone());
                }
                Ok(())
            });
        }

        let mut attrs = HashMap::new();
        attrs.insert("is-detail".to_string(), "true".to_string());
        attrs.insert("detail-type".to_string(), "dormitory".to_string());
        attrs.insert("detail-key".to_string(), "a_dorm".to_string());
        app.handle_result_click(&attrs);

        assert_eq!(app.coordinator().active_view(), ActiveView::Detail);
        assert_eq!(app.coordinator().detail_title(), Some("A区宿舍"));
        assert_eq!(*seen.borrow(), vec!["a_dorm".to_string()]);
    }

    #[tokio::test]
    async fn test_result_click_page_scrolls_and_marks_menu() {
        let tmp = TempDir::new().unwrap();
        let mut app = GuideApp::boot(test_config(&tmp), &fixture()).await;

        let mut attrs = HashMap::new();
        attrs.insert("is-detail".to_string(), "false".to_string());
        attrs.insert("category-key".to_string(), "home".to_string());
        attrs.insert("page-key".to_string(), "home".to_string());
        let effects = app.handle_result_click(&attrs);

        assert_eq!(app.coordinator().active_view(), ActiveView::Main);
        assert!(effects.contains(&ViewEffect::ScrollTo {
            target: "page-home-home".to_string()
        }));
        assert!(app.menu().contains("nav-link active"));
    }

    #[tokio::test]
    async fn test_select_campus_persists_and_refilters() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        let mut app = GuideApp::boot(config.clone(), &fixture()).await;

        app.select_campus("tongguan").unwrap();
        assert_eq!(app.selected_campus(), "tongguan");

        // The cangwu dormitory no longer matches
        match app.handle_search_input("宿舍") {
            SearchOutput::Results(markup) => assert!(markup.contains("search-empty")),
            SearchOutput::Hidden => panic!("expected rendered output"),
        }

        // A rebooted app sees the persisted choice
        let app = GuideApp::boot(config, &fixture()).await;
        assert_eq!(app.selected_campus(), "tongguan");
    }

    #[tokio::test]
    async fn test_select_unknown_campus_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut app = GuideApp::boot(test_config(&tmp), &fixture()).await;
        assert!(app.select_campus("nowhere").is_err());
        assert_eq!(app.selected_campus(), "cangwu");
    }

    #[tokio::test]
    async fn test_direct_detail_open_and_close() {
        let tmp = TempDir::new().unwrap();
        let mut app = GuideApp::boot(test_config(&tmp), &fixture()).await;

        app.show_detail(FacilityKind::Dormitory, "a_dorm");
        assert_eq!(app.coordinator().active_view(), ActiveView::Detail);

        app.hide_detail();
        assert_eq!(app.coordinator().active_view(), ActiveView::Main);
        assert!(app.hide_detail().is_empty());
    }

    #[tokio::test]
    async fn test_token_index_built_at_boot() {
        let tmp = TempDir::new().unwrap();
        let app = GuideApp::boot(test_config(&tmp), &fixture()).await;
        let index = app.token_index();
        assert_eq!(index.doc_count, 2);
        assert!(index.index.contains_key("新生指南"));
    }
}
