//! Pagination window: the full record set sliced into a growing visible
//! page, with overlay entries merged at slice time.

use crate::api::models::Record;

use super::overlay::EditOverlay;

/// Records per page, fixed for the lifetime of one fetch cycle.
pub const PAGE_SIZE: usize = 40;

/// Holds the immutable full record set and the visible page grown from it.
///
/// Locally created rows are prepended to the visible page and tracked
/// outside pagination accounting: the next slice offset is the count of
/// records taken from the full set, not the visible length.
#[derive(Debug, Default)]
pub struct PageWindow {
    full: Vec<Record>,
    visible: Vec<Record>,
    paged: usize,
    has_more: bool,
}

impl PageWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard everything; pre-fetch state.
    pub fn clear(&mut self) {
        self.full.clear();
        self.visible.clear();
        self.paged = 0;
        self.has_more = false;
    }

    /// Install the record set for a new fetch cycle. The set is immutable
    /// after this point; edits only touch visible copies and the overlay.
    pub fn set_records(&mut self, full: Vec<Record>) {
        self.clear();
        self.full = full;
    }

    /// Take the first page from the full set, with the overlay applied.
    pub fn load_first_page(&mut self, overlay: &EditOverlay) {
        let end = PAGE_SIZE.min(self.full.len());
        self.visible = overlay.apply_all(&self.full[..end]);
        self.paged = end;
        self.has_more = self.full.len() > PAGE_SIZE;
    }

    /// Append the next page to the visible slice. A call past exhaustion is
    /// a no-op, which also absorbs duplicate trigger events.
    pub fn load_next_page(&mut self, overlay: &EditOverlay) {
        let start = self.paged;
        let end = (start + PAGE_SIZE).min(self.full.len());
        if start >= end {
            return;
        }
        self.visible.extend(overlay.apply_all(&self.full[start..end]));
        self.paged = end;
        if self.paged >= self.full.len() {
            self.has_more = false;
        }
    }

    /// Prepend a locally created row to the visible page.
    pub fn prepend_row(&mut self, record: Record) {
        self.visible.insert(0, record);
    }

    pub fn visible(&self) -> &[Record] {
        &self.visible
    }

    /// In-place access for immediate cell-edit feedback.
    pub fn row_mut(&mut self, row_id: &str) -> Option<&mut Record> {
        self.visible.iter_mut().find(|r| r.id == row_id)
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Records taken from the full set so far.
    pub fn loaded(&self) -> usize {
        self.paged
    }

    /// Size of the full record set.
    pub fn total(&self) -> usize {
        self.full.len()
    }
}
