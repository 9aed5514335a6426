//! The paginated edit-overlay controller.
//!
//! One instance per grid owns every piece of grid state - loading flag,
//! fetch error, the pagination window and the edit overlay - and exposes
//! the legal transitions between them. The rendering layer only reads rows
//! and calls back through `update_cell`.

use chrono::Utc;

use crate::api::mapper::map_record;
use crate::api::models::{Field, Record};
use crate::config::OverlayStore;

use super::overlay::EditOverlay;
use super::pagination::PageWindow;

pub struct GridController {
    window: PageWindow,
    overlay: EditOverlay,
    store: OverlayStore,
    loading: bool,
    error: Option<String>,
    torn_down: bool,
}

impl GridController {
    /// Build a controller, loading the persisted overlay once.
    pub fn new(store: OverlayStore) -> Self {
        let overlay = store.load();
        Self {
            window: PageWindow::new(),
            overlay,
            store,
            loading: false,
            error: None,
            torn_down: false,
        }
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn rows(&self) -> &[Record] {
        self.window.visible()
    }

    pub fn has_more(&self) -> bool {
        self.window.has_more()
    }

    pub fn loaded(&self) -> usize {
        self.window.loaded()
    }

    pub fn total(&self) -> usize {
        self.window.total()
    }

    /// Begin a fetch cycle. Previous data and error state are discarded.
    pub fn start_fetch(&mut self) {
        self.loading = true;
        self.error = None;
        self.window.clear();
    }

    /// Record the outcome of the in-flight fetch. A torn-down controller
    /// discards the result; no state changes after teardown.
    pub fn fetch_complete(&mut self, result: Result<Vec<serde_json::Value>, String>) {
        if self.torn_down {
            return;
        }
        self.loading = false;
        match result {
            Ok(raw) => {
                let now = Utc::now();
                let records: Vec<Record> = raw
                    .iter()
                    .enumerate()
                    .map(|(index, record)| map_record(record, index, now))
                    .collect();
                self.window.set_records(records);
                self.window.load_first_page(&self.overlay);
                log::info!(
                    "loaded {} records, showing {}",
                    self.total(),
                    self.loaded()
                );
            }
            Err(message) => {
                log::warn!("fetch failed: {}", message);
                self.error = Some(message);
            }
        }
    }

    /// Scroll-triggered loader. Loads the next page only when the sentinel
    /// is visible, nothing is loading, no error is outstanding, and more
    /// pages remain; returns whether a load happened.
    pub fn maybe_load_next(&mut self, sentinel_visible: bool) -> bool {
        if !sentinel_visible || self.loading || self.error.is_some() || !self.window.has_more() {
            return false;
        }
        self.window.load_next_page(&self.overlay);
        log::debug!("visible {}/{} records", self.loaded(), self.total());
        true
    }

    /// Collaborator callback for a committed cell edit: merge into the
    /// overlay, persist the full blob, and patch the visible row in place
    /// for immediate feedback.
    pub fn update_cell(&mut self, row_id: &str, field: Field, value: &str) {
        self.overlay.set(row_id, field.key(), value);
        if let Err(e) = self.store.save(&self.overlay) {
            log::warn!("failed to persist overlay: {:#}", e);
        }
        if let Some(row) = self.window.row_mut(row_id) {
            row.set_field(field.key(), value);
        }
    }

    /// Prepend a locally created, unsaved row; returns its identifier.
    /// Synthesized rows never pass through the mapper, so they get a fresh
    /// uuid instead of a remote-derived id.
    pub fn create_row(&mut self) -> String {
        let record = Record::new_unsaved(
            uuid::Uuid::new_v4().to_string(),
            Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        let id = record.id.clone();
        self.window.prepend_row(record);
        id
    }

    /// Mark the owning component as gone; any late fetch result is dropped.
    pub fn teardown(&mut self) {
        self.torn_down = true;
    }
}
