// src/view/mod.rs

//! View-state machine.
//!
//! The coordinator is a pure state machine over the top-level views: the
//! main content view, the facility detail view (exclusive with main), and
//! the mobile search overlay (independent toggle). Transitions return
//! [`ViewEffect`] intents; a thin presentation adapter applies them to
//! whatever shell is in use. Nothing here touches a DOM.
//!
//! Detail lookups race with asynchronous corpus loading, so resolution
//! failure is a soft failure: the machine still transitions and emits a
//! placeholder render intent instead of an error.

use crate::event::ResultSelection;
use crate::models::{CampusData, FacilityKind, FacilityRecord};

/// Which exclusive top-level view is interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Main,
    Detail,
}

/// What the detail view is currently showing.
#[derive(Debug, Clone, PartialEq)]
struct DetailContext {
    kind: Option<FacilityKind>,
    key: String,
    title: String,
}

/// Presentation intents emitted by transitions, applied in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEffect {
    /// Make the main view interactive.
    EnterMain,
    /// Hide the main view (after the incoming view has entered).
    ExitMain,
    /// Make the detail view interactive with the given header title.
    EnterDetail { title: String },
    /// Hide the detail view.
    ExitDetail,
    /// Populate the detail view with a resolved facility record.
    RenderDetail { record: FacilityRecord },
    /// Populate the detail view with a "not found" placeholder.
    RenderDetailPlaceholder { key: String },
    /// Open the mobile search overlay.
    EnterMobileSearch,
    /// Close the mobile search overlay.
    ExitMobileSearch,
    /// Clear the query input and any rendered live results.
    ClearSearchInput,
    /// Scroll the main view to a page section anchor.
    ScrollTo { target: String },
}

/// Title shown when a detail key cannot be resolved.
const NOT_FOUND_TITLE: &str = "未找到相关信息";

/// Owns which top-level view is visible and routes result selections.
///
/// All transitions are idempotent with respect to repeated calls in the
/// same direction; a redundant call returns no effects.
#[derive(Debug)]
pub struct ViewCoordinator {
    active: ActiveView,
    detail: Option<DetailContext>,
    mobile_search_open: bool,
    active_nav: Option<(String, String)>,
}

impl Default for ViewCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewCoordinator {
    /// Initial state: main view, overlay closed.
    pub fn new() -> Self {
        Self {
            active: ActiveView::Main,
            detail: None,
            mobile_search_open: false,
            active_nav: None,
        }
    }

    /// The currently interactive exclusive view.
    pub fn active_view(&self) -> ActiveView {
        self.active
    }

    /// Header title of the open detail view, if any.
    pub fn detail_title(&self) -> Option<&str> {
        self.detail.as_ref().map(|d| d.title.as_str())
    }

    /// Whether the mobile search overlay is open.
    pub fn is_mobile_search_open(&self) -> bool {
        self.mobile_search_open
    }

    /// Active navigation pair, read for active-link styling.
    pub fn active_nav(&self) -> Option<(&str, &str)> {
        self.active_nav
            .as_ref()
            .map(|(c, p)| (c.as_str(), p.as_str()))
    }

    /// Open the detail view for a facility.
    ///
    /// The incoming view's effects precede the outgoing view's exit so the
    /// presentation layer can schedule the handoff without a blank frame.
    /// Corpus not loaded or key absent degrades to a placeholder render.
    pub fn show_detail(
        &mut self,
        kind: FacilityKind,
        key: &str,
        corpus: Option<&CampusData>,
    ) -> Vec<ViewEffect> {
        // Re-entrant call for the record already on screen
        if self.active == ActiveView::Detail
            && self
                .detail
                .as_ref()
                .is_some_and(|d| d.kind == Some(kind) && d.key == key)
        {
            return Vec::new();
        }

        let record = corpus.and_then(|c| c.facility(kind, key));
        let mut effects = Vec::new();
        let title = match record {
            Some(record) => {
                effects.push(ViewEffect::RenderDetail {
                    record: record.clone(),
                });
                record.name.clone()
            }
            None => {
                log::warn!("detail lookup failed for {kind} '{key}'");
                effects.push(ViewEffect::RenderDetailPlaceholder {
                    key: key.to_string(),
                });
                NOT_FOUND_TITLE.to_string()
            }
        };

        effects.push(ViewEffect::EnterDetail {
            title: title.clone(),
        });
        if self.active == ActiveView::Main {
            effects.push(ViewEffect::ExitMain);
        }

        self.active = ActiveView::Detail;
        self.detail = Some(DetailContext {
            kind: Some(kind),
            key: key.to_string(),
            title,
        });
        effects
    }

    /// Close the detail view. No-op when the main view is already active.
    pub fn hide_detail(&mut self) -> Vec<ViewEffect> {
        if self.active == ActiveView::Main {
            return Vec::new();
        }
        self.active = ActiveView::Main;
        self.detail = None;
        vec![ViewEffect::EnterMain, ViewEffect::ExitDetail]
    }

    /// Open the mobile search overlay. Independent of Main/Detail.
    pub fn show_mobile_search(&mut self) -> Vec<ViewEffect> {
        if self.mobile_search_open {
            return Vec::new();
        }
        self.mobile_search_open = true;
        vec![ViewEffect::EnterMobileSearch]
    }

    /// Close the mobile search overlay, clearing query and results so the
    /// next open never shows stale state.
    pub fn hide_mobile_search(&mut self) -> Vec<ViewEffect> {
        if !self.mobile_search_open {
            return Vec::new();
        }
        self.mobile_search_open = false;
        vec![ViewEffect::ExitMobileSearch, ViewEffect::ClearSearchInput]
    }

    /// Collapse every open overlay back to the plain main view.
    pub fn hide_all_views(&mut self) -> Vec<ViewEffect> {
        let mut effects = self.hide_mobile_search();
        effects.extend(self.hide_detail());
        effects
    }

    /// Route a clicked search result.
    ///
    /// Overlays are collapsed first so scroll-position calculations run
    /// against the final, stable viewport.
    pub fn result_selected(
        &mut self,
        selection: &ResultSelection,
        corpus: Option<&CampusData>,
    ) -> Vec<ViewEffect> {
        let mut effects = self.hide_all_views();

        if selection.is_detail {
            let kind = selection.detail_type.as_deref().and_then(FacilityKind::parse);
            let key = selection.detail_key.clone().unwrap_or_default();
            match kind {
                Some(kind) => effects.extend(self.show_detail(kind, &key, corpus)),
                None => {
                    log::warn!(
                        "result selection with unknown detail type {:?}",
                        selection.detail_type
                    );
                    effects.extend(self.enter_detail_placeholder(&key));
                }
            }
        } else {
            match (&selection.category_key, &selection.page_key) {
                (Some(category_key), Some(page_key)) => {
                    effects.push(ViewEffect::ScrollTo {
                        target: format!("page-{category_key}-{page_key}"),
                    });
                    self.active_nav = Some((category_key.clone(), page_key.clone()));
                }
                _ => log::warn!("result selection missing category/page keys"),
            }
        }

        effects
    }

    /// Transition to the detail view showing only the placeholder.
    fn enter_detail_placeholder(&mut self, key: &str) -> Vec<ViewEffect> {
        let mut effects = vec![
            ViewEffect::RenderDetailPlaceholder {
                key: key.to_string(),
            },
            ViewEffect::EnterDetail {
                title: NOT_FOUND_TITLE.to_string(),
            },
        ];
        if self.active == ActiveView::Main {
            effects.push(ViewEffect::ExitMain);
        }
        self.active = ActiveView::Detail;
        self.detail = Some(DetailContext {
            kind: None,
            key: key.to_string(),
            title: NOT_FOUND_TITLE.to_string(),
        });
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Campus;

    fn corpus() -> CampusData {
        CampusData {
            campuses: vec![Campus {
                id: "cangwu".to_string(),
                name: "苍梧校区".to_string(),
            }],
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
        }
    }

    fn selection_detail() -> ResultSelection {
        ResultSelection {
            is_detail: true,
            detail_type: Some("dormitory".to_string()),
            detail_key: Some("a_dorm".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_show_detail_transitions_and_orders_handoff() {
        let corpus = corpus();
        let mut coordinator = ViewCoordinator::new();
        let effects = coordinator.show_detail(FacilityKind::Dormitory, "a_dorm", Some(&corpus));

        assert_eq!(coordinator.active_view(), ActiveView::Detail);
        assert_eq!(coordinator.detail_title(), Some("A区宿舍"));

        // Incoming view enters before the outgoing view exits
        let enter = effects
            .iter()
            .position(|e| matches!(e, ViewEffect::EnterDetail { .. }))
            .unwrap();
        let exit = effects
            .iter()
            .position(|e| matches!(e, ViewEffect::ExitMain))
            .unwrap();
        assert!(enter < exit);
    }

    #[test]
    fn test_show_detail_not_found_is_soft() {
        let corpus = corpus();
        let mut coordinator = ViewCoordinator::new();
        let effects = coordinator.show_detail(FacilityKind::Canteen, "nope", Some(&corpus));

        assert!(effects
            .iter()
            .any(|e| matches!(e, ViewEffect::RenderDetailPlaceholder { .. })));
        assert_eq!(coordinator.active_view(), ActiveView::Detail);
    }

    #[test]
    fn test_show_detail_before_corpus_loaded() {
        let mut coordinator = ViewCoordinator::new();
        let effects = coordinator.show_detail(FacilityKind::Dormitory, "a_dorm", None);
        assert!(effects
            .iter()
            .any(|e| matches!(e, ViewEffect::RenderDetailPlaceholder { .. })));
    }

    #[test]
    fn test_show_detail_reentrant_is_noop() {
        let corpus = corpus();
        let mut coordinator = ViewCoordinator::new();
        coordinator.show_detail(FacilityKind::Dormitory, "a_dorm", Some(&corpus));
        let effects = coordinator.show_detail(FacilityKind::Dormitory, "a_dorm", Some(&corpus));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_hide_detail_idempotent() {
        let corpus = corpus();
        let mut coordinator = ViewCoordinator::new();
        coordinator.show_detail(FacilityKind::Dormitory, "a_dorm", Some(&corpus));

        let first = coordinator.hide_detail();
        assert_eq!(first, vec![ViewEffect::EnterMain, ViewEffect::ExitDetail]);

        let second = coordinator.hide_detail();
        assert!(second.is_empty());
        assert_eq!(coordinator.active_view(), ActiveView::Main);
    }

    #[test]
    fn test_main_detail_exclusive_after_every_transition() {
        let corpus = corpus();
        let mut coordinator = ViewCoordinator::new();

        // Exactly one of Main/Detail at every post-transition observation:
        // the active view is a single-valued enum, so check it flips.
        assert_eq!(coordinator.active_view(), ActiveView::Main);
        coordinator.show_detail(FacilityKind::Dormitory, "a_dorm", Some(&corpus));
        assert_eq!(coordinator.active_view(), ActiveView::Detail);
        coordinator.hide_detail();
        assert_eq!(coordinator.active_view(), ActiveView::Main);
    }

    #[test]
    fn test_mobile_search_toggle_clears_on_hide() {
        let mut coordinator = ViewCoordinator::new();
        assert_eq!(
            coordinator.show_mobile_search(),
            vec![ViewEffect::EnterMobileSearch]
        );
        assert!(coordinator.show_mobile_search().is_empty());

        let effects = coordinator.hide_mobile_search();
        assert!(effects.contains(&ViewEffect::ClearSearchInput));
        assert!(coordinator.hide_mobile_search().is_empty());
    }

    #[test]
    fn test_mobile_search_does_not_affect_detail_state() {
        let corpus = corpus();
        let mut coordinator = ViewCoordinator::new();
        coordinator.show_detail(FacilityKind::Dormitory, "a_dorm", Some(&corpus));
        coordinator.show_mobile_search();
        assert_eq!(coordinator.active_view(), ActiveView::Detail);
    }

    #[test]
    fn test_result_selected_detail_ends_in_detail_with_title() {
        let corpus = corpus();
        let mut coordinator = ViewCoordinator::new();
        coordinator.result_selected(&selection_detail(), Some(&corpus));

        assert_eq!(coordinator.active_view(), ActiveView::Detail);
        assert_eq!(coordinator.detail_title(), Some("A区宿舍"));
    }

    #[test]
    fn test_result_selected_page_scrolls_main() {
        let corpus = corpus();
        let mut coordinator = ViewCoordinator::new();
        let selection = ResultSelection {
            is_detail: false,
            category_key: Some("home".to_string()),
            page_key: Some("home".to_string()),
            ..Default::default()
        };
        let effects = coordinator.result_selected(&selection, Some(&corpus));

        assert_eq!(coordinator.active_view(), ActiveView::Main);
        assert!(effects.contains(&ViewEffect::ScrollTo {
            target: "page-home-home".to_string()
        }));
        assert_eq!(coordinator.active_nav(), Some(("home", "home")));
    }

    #[test]
    fn test_result_selected_collapses_overlays_first() {
        let corpus = corpus();
        let mut coordinator = ViewCoordinator::new();
        coordinator.show_mobile_search();
        coordinator.show_detail(FacilityKind::Dormitory, "a_dorm", Some(&corpus));

        let selection = ResultSelection {
            is_detail: false,
            category_key: Some("home".to_string()),
            page_key: Some("faq".to_string()),
            ..Default::default()
        };
        let effects = coordinator.result_selected(&selection, Some(&corpus));

        let exit_overlay = effects
            .iter()
            .position(|e| matches!(e, ViewEffect::ExitMobileSearch))
            .unwrap();
        let scroll = effects
            .iter()
            .position(|e| matches!(e, ViewEffect::ScrollTo { .. }))
            .unwrap();
        assert!(exit_overlay < scroll);
        assert!(!coordinator.is_mobile_search_open());
        assert_eq!(coordinator.active_view(), ActiveView::Main);
    }

    #[test]
    fn test_result_selected_unknown_detail_type_degrades() {
        let corpus = corpus();
        let mut coordinator = ViewCoordinator::new();
        let selection = ResultSelection {
            is_detail: true,
            detail_type: Some("library".to_string()),
            detail_key: Some("x".to_string()),
            ..Default::default()
        };
        let effects = coordinator.result_selected(&selection, Some(&corpus));
        assert!(effects
            .iter()
            .any(|e| matches!(e, ViewEffect::RenderDetailPlaceholder { .. })));
        assert_eq!(coordinator.active_view(), ActiveView::Detail);
    }
}
