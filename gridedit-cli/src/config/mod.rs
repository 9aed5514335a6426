//! Durable storage for the edit overlay.
//!
//! One JSON blob under the platform config directory. Read once at startup,
//! replaced wholesale on every overlay mutation.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::grid::EditOverlay;

pub struct OverlayStore {
    path: PathBuf,
}

impl OverlayStore {
    /// Store at the default location (~/.config/gridedit-cli/overlay.json).
    pub fn new() -> Self {
        let dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gridedit-cli");
        Self {
            path: dir.join("overlay.json"),
        }
    }

    /// Store at an explicit path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the persisted overlay. A missing or unreadable blob degrades to
    /// an empty overlay; this is never an error.
    pub fn load(&self) -> EditOverlay {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return EditOverlay::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(overlay) => overlay,
            Err(e) => {
                log::warn!(
                    "discarding unreadable overlay at {}: {}",
                    self.path.display(),
                    e
                );
                EditOverlay::new()
            }
        }
    }

    /// Persist the full in-memory overlay, replacing the stored blob.
    pub fn save(&self, overlay: &EditOverlay) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let raw = serde_json::to_string(overlay).context("serializing overlay")?;
        fs::write(&self.path, raw).with_context(|| format!("writing {}", self.path.display()))
    }
}

impl Default for OverlayStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_blob_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = OverlayStore::with_path(dir.path().join("overlay.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_blob_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overlay.json");
        fs::write(&path, "{not json").unwrap();
        let store = OverlayStore::with_path(path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = OverlayStore::with_path(dir.path().join("nested").join("overlay.json"));

        let mut overlay = EditOverlay::new();
        overlay.set("row-3", "bio", "hi");
        store.save(&overlay).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, overlay);
        assert_eq!(
            loaded.entry("row-3").unwrap().get("bio").map(String::as_str),
            Some("hi")
        );
    }

    #[test]
    fn test_save_overwrites_previous_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = OverlayStore::with_path(dir.path().join("overlay.json"));

        let mut first = EditOverlay::new();
        first.set("a", "name", "one");
        store.save(&first).unwrap();

        let mut second = EditOverlay::new();
        second.set("b", "name", "two");
        store.save(&second).unwrap();

        let loaded = store.load();
        assert!(loaded.entry("a").is_none());
        assert!(loaded.entry("b").is_some());
    }
}
