// src/event/mod.rs

//! Typed publish/subscribe event bus.
//!
//! Producers and consumers are decoupled through `AppEvent`, a closed enum
//! whose variants correspond 1:1 to the browser-side event names:
//!
//! - `search:resultClicked` -> [`AppEvent::SearchResultClicked`]
//! - `toast:show`           -> [`AppEvent::ToastShow`]
//! - `detail:show`          -> [`AppEvent::DetailShow`]
//! - `nav:requestScroll`    -> [`AppEvent::NavRequestScroll`]
//!
//! Fan-out is synchronous and in-process: handlers run immediately on the
//! calling thread, in subscription order. A handler failure is logged and
//! never prevents the remaining handlers from running.

use std::collections::HashMap;

use crate::error::Result;
use crate::models::FacilityKind;

/// Application events with fixed payload schemas.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A rendered search result was activated.
    SearchResultClicked(ResultSelection),

    /// Show a transient user notification.
    ToastShow { message: String, kind: ToastKind },

    /// Open the detail view for a facility.
    DetailShow { kind: FacilityKind, key: String },

    /// Scroll the main view to a guide page section.
    NavRequestScroll {
        category_key: String,
        page_key: String,
    },
}

impl AppEvent {
    /// Event kind used as the subscription key.
    pub fn kind(&self) -> EventKind {
        match self {
            AppEvent::SearchResultClicked(_) => EventKind::SearchResultClicked,
            AppEvent::ToastShow { .. } => EventKind::ToastShow,
            AppEvent::DetailShow { .. } => EventKind::DetailShow,
            AppEvent::NavRequestScroll { .. } => EventKind::NavRequestScroll,
        }
    }

    /// Browser-side event name for this variant.
    pub fn wire_name(&self) -> &'static str {
        self.kind().wire_name()
    }
}

/// Discriminant of [`AppEvent`], used to key subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SearchResultClicked,
    ToastShow,
    DetailShow,
    NavRequestScroll,
}

impl EventKind {
    /// Browser-side event name.
    pub fn wire_name(&self) -> &'static str {
        match self {
            EventKind::SearchResultClicked => "search:resultClicked",
            EventKind::ToastShow => "toast:show",
            EventKind::DetailShow => "detail:show",
            EventKind::NavRequestScroll => "nav:requestScroll",
        }
    }
}

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

/// Raw data-attribute bag carried by a clicked search result.
///
/// Attribute values arrive as strings; `is_detail` coerces `"true"` only,
/// everything else (including absence) is false.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSelection {
    pub is_detail: bool,
    pub category_key: Option<String>,
    pub page_key: Option<String>,
    pub detail_type: Option<String>,
    pub detail_key: Option<String>,
}

impl ResultSelection {
    /// Parse from a data-attribute map (`data-` prefix stripped, kebab-case
    /// keys as rendered by the result markup).
    pub fn from_attrs(attrs: &HashMap<String, String>) -> Self {
        let get = |key: &str| attrs.get(key).map(|v| v.to_string());
        Self {
            is_detail: attrs.get("is-detail").map(String::as_str) == Some("true"),
            category_key: get("category-key"),
            page_key: get("page-key"),
            detail_type: get("detail-type"),
            detail_key: get("detail-key"),
        }
    }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// An event handler. Failures are reported through the `Result` and
/// isolated per handler during fan-out.
pub type Handler = Box<dyn FnMut(&AppEvent) -> Result<()>>;

/// Process-wide publish/subscribe registry.
#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<EventKind, Vec<(SubscriptionId, Handler)>>,
    next_id: u64,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one event kind.
    ///
    /// Handlers for the same kind run in subscription order.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&AppEvent) -> Result<()> + 'static,
    ) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.handlers
            .entry(kind)
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Remove a previously registered handler.
    ///
    /// Returns false if the id is unknown (already unsubscribed).
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for handlers in self.handlers.values_mut() {
            if let Some(pos) = handlers.iter().position(|(hid, _)| *hid == id) {
                handlers.remove(pos);
                return true;
            }
        }
        false
    }

    /// Synchronously fan an event out to its subscribers.
    ///
    /// A failing handler is logged and skipped; the rest still run.
    pub fn publish(&mut self, event: &AppEvent) {
        let Some(handlers) = self.handlers.get_mut(&event.kind()) else {
            return;
        };
        for (id, handler) in handlers.iter_mut() {
            if let Err(e) = handler(event) {
                log::warn!(
                    "handler {:?} for '{}' failed: {}",
                    id,
                    event.wire_name(),
                    e
                );
            }
        }
    }

    /// Number of handlers registered for a kind.
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}
