//! List selection and scrolling state for the grid table.

use crossterm::event::KeyCode;

/// Manages the selected row and the scroll offset, keeping the selection
/// inside the viewport with a small scroll-off margin (like vim scrolloff).
#[derive(Debug, Clone)]
pub struct ListState {
    selected: Option<usize>,
    scroll_offset: usize,
    scroll_off: usize,
    viewport_height: Option<usize>, // Last known viewport height from the renderer
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListState {
    /// Create a new ListState with no selection.
    pub fn new() -> Self {
        Self {
            selected: None,
            scroll_offset: 0,
            scroll_off: 3,
            viewport_height: None,
        }
    }

    /// Create a new ListState with the first item selected.
    pub fn with_selection() -> Self {
        Self {
            selected: Some(0),
            ..Self::new()
        }
    }

    /// Set the viewport height (called by the renderer with the actual area
    /// height).
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = Some(height);
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Set the selection and adjust scroll to ensure it is visible.
    pub fn select_and_scroll(&mut self, index: Option<usize>, item_count: usize) {
        self.selected = index;
        if let Some(height) = self.viewport_height {
            self.update_scroll(height, item_count);
        }
    }

    /// Handle a navigation key, returns true if handled. Uses the stored
    /// viewport height if available, otherwise the provided fallback.
    pub fn handle_key(&mut self, key: KeyCode, item_count: usize, visible_height: usize) -> bool {
        if item_count == 0 {
            return false;
        }

        let height = self.viewport_height.unwrap_or(visible_height);

        match key {
            KeyCode::Up => {
                self.move_up(item_count, height);
                true
            }
            KeyCode::Down => {
                self.move_down(item_count, height);
                true
            }
            KeyCode::PageUp => {
                self.page_up(item_count, height);
                true
            }
            KeyCode::PageDown => {
                self.page_down(item_count, height);
                true
            }
            KeyCode::Home => {
                self.select_first(item_count, height);
                true
            }
            KeyCode::End => {
                self.select_last(item_count, height);
                true
            }
            _ => false,
        }
    }

    fn move_up(&mut self, item_count: usize, visible_height: usize) {
        match self.selected {
            Some(sel) if sel > 0 => self.selected = Some(sel - 1),
            Some(_) => {}
            None => self.selected = Some(0),
        }
        self.update_scroll(visible_height, item_count);
    }

    fn move_down(&mut self, item_count: usize, visible_height: usize) {
        match self.selected {
            Some(sel) if sel + 1 < item_count => self.selected = Some(sel + 1),
            Some(sel) => self.selected = Some(sel.min(item_count - 1)),
            None => self.selected = Some(0),
        }
        self.update_scroll(visible_height, item_count);
    }

    fn page_up(&mut self, item_count: usize, visible_height: usize) {
        let sel = self.selected.unwrap_or(0);
        self.selected = Some(sel.saturating_sub(visible_height));
        self.update_scroll(visible_height, item_count);
    }

    fn page_down(&mut self, item_count: usize, visible_height: usize) {
        let sel = self.selected.unwrap_or(0);
        self.selected = Some((sel + visible_height).min(item_count - 1));
        self.update_scroll(visible_height, item_count);
    }

    fn select_first(&mut self, item_count: usize, visible_height: usize) {
        self.selected = Some(0);
        self.update_scroll(visible_height, item_count);
    }

    fn select_last(&mut self, item_count: usize, visible_height: usize) {
        self.selected = Some(item_count - 1);
        self.update_scroll(visible_height, item_count);
    }

    /// Update the scroll offset so the selection stays visible with the
    /// scroll-off margin maintained.
    pub fn update_scroll(&mut self, visible_height: usize, item_count: usize) {
        if let Some(sel) = self.selected {
            let min_scroll =
                sel.saturating_sub(visible_height.saturating_sub(self.scroll_off + 1));
            let max_scroll = sel.saturating_sub(self.scroll_off);

            if self.scroll_offset < min_scroll {
                self.scroll_offset = min_scroll;
            } else if self.scroll_offset > max_scroll {
                self.scroll_offset = max_scroll;
            }

            let max_offset = item_count.saturating_sub(visible_height);
            self.scroll_offset = self.scroll_offset.min(max_offset);
        }
    }
}
