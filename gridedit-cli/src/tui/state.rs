//! State and messages for the grid app.

use crossterm::event::KeyEvent;

use crate::api::models::Field;
use crate::grid::{CellEditor, GridController};

use super::widgets::ListState;

/// A grid column: header title, render width, and the editable field it
/// maps to (None for read-only columns).
pub struct Column {
    pub title: &'static str,
    pub field: Option<Field>,
    pub width: u16,
}

/// Column definitions handed to the table, in render order.
pub const COLUMNS: [Column; 6] = [
    Column {
        title: "Name",
        field: Some(Field::Name),
        width: 24,
    },
    Column {
        title: "Bio",
        field: Some(Field::Bio),
        width: 34,
    },
    Column {
        title: "Language",
        field: Some(Field::Language),
        width: 16,
    },
    Column {
        title: "Region",
        field: Some(Field::Region),
        width: 8,
    },
    Column {
        title: "Created",
        field: None,
        width: 20,
    },
    Column {
        title: "Status",
        field: Some(Field::Status),
        width: 14,
    },
];

pub struct State {
    pub controller: GridController,
    pub list_state: ListState,
    /// Index into COLUMNS of the focused cell.
    pub focused_col: usize,
    /// Open cell editor; None means every cell is in display mode.
    pub editor: Option<CellEditor>,
    /// Table body height from the last render.
    pub viewport_height: usize,
    pub should_quit: bool,
}

impl State {
    pub fn new(controller: GridController) -> Self {
        Self {
            controller,
            list_state: ListState::with_selection(),
            focused_col: 0,
            editor: None,
            viewport_height: 20, // reasonable default until the first render
            should_quit: false,
        }
    }

    /// Navigable rows: the visible records plus the trailing sentinel row.
    pub fn display_count(&self) -> usize {
        self.controller.rows().len() + 1
    }

    /// Whether the sentinel row sits inside the rendered window.
    pub fn sentinel_visible(&self) -> bool {
        let sentinel = self.controller.rows().len();
        sentinel < self.list_state.scroll_offset() + self.viewport_height
    }
}

pub enum Msg {
    Key(KeyEvent),
    RecordsLoaded(Result<Vec<serde_json::Value>, String>),
}
