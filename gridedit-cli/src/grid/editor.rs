//! Cell edit protocol: the display/editing state machine for a single cell.
//!
//! A cell in display mode has no editor; an open `CellEditor` IS the editing
//! state, so "editing with no pending value" is unrepresentable. Commit runs
//! the field validator; a failed commit keeps the editor open with the
//! rejected value and an inline message, and leaves the record untouched.

use crate::api::models::{Field, Record, Status};

/// Validation outcome for a candidate cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Valid,
    Invalid(String),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Validation::Valid => None,
            Validation::Invalid(msg) => Some(msg),
        }
    }
}

/// Validate a candidate value for a field. Bio has no validator; status is
/// only ever committed from the select editor, which offers legal members.
pub fn validate_field(field: Field, value: &str) -> Validation {
    match field {
        Field::Name => non_empty(value, "Name must not be empty"),
        Field::Language => non_empty(value, "Language must not be empty"),
        Field::Region => region_code(value),
        Field::Bio | Field::Status => Validation::Valid,
    }
}

fn non_empty(value: &str, message: &str) -> Validation {
    if value.trim().is_empty() {
        Validation::Invalid(message.to_string())
    } else {
        Validation::Valid
    }
}

fn region_code(value: &str) -> Validation {
    let trimmed = value.trim();
    if trimmed.len() == 2 && trimmed.bytes().all(|b| b.is_ascii_uppercase()) {
        Validation::Valid
    } else {
        Validation::Invalid("Region must be two uppercase letters (e.g. US)".to_string())
    }
}

/// An open cell editor: free text for most fields, a fixed option list for
/// the status field.
#[derive(Debug, Clone)]
pub enum CellEditor {
    Text(TextEdit),
    Select(SelectEdit),
}

impl CellEditor {
    /// Open an editor for a cell, seeded with the current merged value.
    pub fn for_cell(record: &Record, field: Field) -> CellEditor {
        match field {
            Field::Status => CellEditor::Select(SelectEdit::new(record)),
            _ => CellEditor::Text(TextEdit::new(record, field)),
        }
    }

    pub fn row_id(&self) -> &str {
        match self {
            CellEditor::Text(edit) => &edit.row_id,
            CellEditor::Select(edit) => &edit.row_id,
        }
    }

    pub fn field(&self) -> Field {
        match self {
            CellEditor::Text(edit) => edit.field,
            CellEditor::Select(_) => Field::Status,
        }
    }

    /// Attempt to commit. `Some(value)` ends the editing state; `None` keeps
    /// it open with the validation message surfaced.
    pub fn commit(&mut self) -> Option<String> {
        match self {
            CellEditor::Text(edit) => edit.commit(),
            CellEditor::Select(edit) => Some(edit.commit()),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CellEditor::Text(edit) => edit.error.as_deref(),
            CellEditor::Select(_) => None,
        }
    }
}

/// Editing state for a free-text cell.
#[derive(Debug, Clone)]
pub struct TextEdit {
    pub row_id: String,
    pub field: Field,
    /// Last committed value; what cancel restores to.
    pub original: String,
    pub buffer: String,
    /// Cursor position in characters.
    pub cursor: usize,
    pub error: Option<String>,
}

impl TextEdit {
    fn new(record: &Record, field: Field) -> Self {
        let original = record.field_value(field).to_string();
        let cursor = original.chars().count();
        Self {
            row_id: record.id.clone(),
            field,
            buffer: original.clone(),
            original,
            cursor,
            error: None,
        }
    }

    fn byte_index(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.buffer.insert(at, c);
        self.cursor += 1;
        self.error = None;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index();
        self.buffer.remove(at);
        self.error = None;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.chars().count();
    }

    /// Reset the input to the last committed value.
    pub fn cancel(&mut self) {
        self.buffer = self.original.clone();
        self.cursor = self.buffer.chars().count();
        self.error = None;
    }

    fn commit(&mut self) -> Option<String> {
        match validate_field(self.field, &self.buffer) {
            Validation::Valid => Some(self.buffer.clone()),
            Validation::Invalid(msg) => {
                // Rejected value stays in the buffer for correction.
                self.error = Some(msg);
                None
            }
        }
    }
}

/// Editing state for the status cell: a fixed enumeration of legal values,
/// so commit always validates.
#[derive(Debug, Clone)]
pub struct SelectEdit {
    pub row_id: String,
    pub options: Vec<String>,
    pub highlighted: usize,
}

impl SelectEdit {
    fn new(record: &Record) -> Self {
        let options: Vec<String> = Status::ALL.iter().map(|s| s.as_str().to_string()).collect();
        let highlighted = options
            .iter()
            .position(|o| o == record.status.as_str())
            .unwrap_or(0);
        Self {
            row_id: record.id.clone(),
            options,
            highlighted,
        }
    }

    pub fn prev(&mut self) {
        if self.highlighted > 0 {
            self.highlighted -= 1;
        }
    }

    pub fn next(&mut self) {
        if self.highlighted + 1 < self.options.len() {
            self.highlighted += 1;
        }
    }

    pub fn highlighted_option(&self) -> &str {
        &self.options[self.highlighted]
    }

    fn commit(&self) -> String {
        self.options[self.highlighted].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            id: "r1".into(),
            name: "Ada".into(),
            bio: String::new(),
            language: "en".into(),
            region: "US".into(),
            created_at: "2024-01-01 00:00:00".into(),
            status: Status::Pending,
            is_new: false,
        }
    }

    #[test]
    fn test_region_validator_rejects_lowercase() {
        assert!(!validate_field(Field::Region, "ca").is_valid());
        assert!(validate_field(Field::Region, "CA").is_valid());
        assert!(validate_field(Field::Region, " CA ").is_valid());
        assert!(!validate_field(Field::Region, "CAL").is_valid());
        assert!(!validate_field(Field::Region, "C1").is_valid());
        assert!(!validate_field(Field::Region, "").is_valid());
    }

    #[test]
    fn test_name_and_language_require_content() {
        assert!(!validate_field(Field::Name, "   ").is_valid());
        assert!(validate_field(Field::Name, " Ada ").is_valid());
        assert!(!validate_field(Field::Language, "").is_valid());
        assert!(validate_field(Field::Language, "en").is_valid());
    }

    #[test]
    fn test_bio_has_no_validator() {
        assert!(validate_field(Field::Bio, "").is_valid());
    }

    #[test]
    fn test_failed_commit_keeps_editing_state() {
        let mut editor = CellEditor::for_cell(&record(), Field::Region);
        let CellEditor::Text(edit) = &mut editor else {
            panic!("region edits as text");
        };
        edit.buffer = "ca".into();
        assert_eq!(editor.commit(), None);
        assert_eq!(editor.error(), Some("Region must be two uppercase letters (e.g. US)"));
        // rejected value retained for correction
        let CellEditor::Text(edit) = &editor else {
            panic!();
        };
        assert_eq!(edit.buffer, "ca");
    }

    #[test]
    fn test_successful_commit_returns_value() {
        let mut editor = CellEditor::for_cell(&record(), Field::Region);
        if let CellEditor::Text(edit) = &mut editor {
            edit.buffer = "CA".into();
        }
        assert_eq!(editor.commit(), Some("CA".into()));
        assert_eq!(editor.error(), None);
    }

    #[test]
    fn test_cancel_restores_last_committed_value() {
        let mut edit = match CellEditor::for_cell(&record(), Field::Name) {
            CellEditor::Text(edit) => edit,
            CellEditor::Select(_) => panic!("name edits as text"),
        };
        edit.insert('!');
        assert_eq!(edit.buffer, "Ada!");
        edit.cancel();
        assert_eq!(edit.buffer, "Ada");
        assert_eq!(edit.cursor, 3);
    }

    #[test]
    fn test_typing_clears_stale_error() {
        let mut edit = match CellEditor::for_cell(&record(), Field::Name) {
            CellEditor::Text(edit) => edit,
            CellEditor::Select(_) => panic!(),
        };
        edit.buffer.clear();
        edit.cursor = 0;
        assert!(edit.commit().is_none());
        assert!(edit.error.is_some());
        edit.insert('A');
        assert!(edit.error.is_none());
    }

    #[test]
    fn test_select_editor_seeds_from_current_status() {
        let editor = CellEditor::for_cell(&record(), Field::Status);
        let CellEditor::Select(select) = editor else {
            panic!("status edits as select");
        };
        assert_eq!(select.highlighted_option(), "pending");
    }

    #[test]
    fn test_select_commit_is_always_valid() {
        let mut editor = CellEditor::for_cell(&record(), Field::Status);
        if let CellEditor::Select(select) = &mut editor {
            select.next();
        }
        assert_eq!(editor.commit(), Some("suspended".into()));
    }

    #[test]
    fn test_cursor_edits_are_char_aware() {
        let mut edit = match CellEditor::for_cell(&record(), Field::Name) {
            CellEditor::Text(edit) => edit,
            CellEditor::Select(_) => panic!(),
        };
        edit.buffer = "héllo".into();
        edit.move_end();
        edit.backspace();
        assert_eq!(edit.buffer, "héll");
        edit.move_home();
        edit.insert('x');
        assert_eq!(edit.buffer, "xhéll");
    }
}
