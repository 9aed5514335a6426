//! Sparse set of user edits keyed by row identifier, merged over base
//! records at read time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::models::Record;

/// Row-id -> partial field map. Entries are idempotent to reapply, never
/// deleted, and inert for identifiers no longer present in any loaded page.
///
/// Serializes to the durable blob shape directly:
/// `{"row-3": {"bio": "hi"}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditOverlay {
    #[serde(flatten)]
    entries: HashMap<String, HashMap<String, String>>,
}

impl EditOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge `{field: value}` into the entry for `row_id`, creating the
    /// entry when absent. Other fields of the entry are untouched.
    pub fn set(&mut self, row_id: &str, field: &str, value: &str) {
        self.entries
            .entry(row_id.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
    }

    pub fn entry(&self, row_id: &str) -> Option<&HashMap<String, String>> {
        self.entries.get(row_id)
    }

    /// Merge this record's overlay entry on top of it, if one exists.
    /// Overlay wins on conflict; fields absent from the entry are left as-is.
    pub fn apply(&self, record: &mut Record) {
        if let Some(entry) = self.entries.get(&record.id) {
            for (field, value) in entry {
                record.set_field(field, value);
            }
        }
    }

    /// A new list with each record's overlay entry merged on top.
    pub fn apply_all(&self, records: &[Record]) -> Vec<Record> {
        records
            .iter()
            .map(|record| {
                let mut merged = record.clone();
                self.apply(&mut merged);
                merged
            })
            .collect()
    }
}
