use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use log::warn;

/// Minimal key-value persistence boundary, mirroring web local storage.
///
/// Reads yield `None` for anything missing or unreadable; writes are
/// infallible at the trait level and implementations log failures instead of
/// surfacing them.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// In-memory store for tests and pre-init phases.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

/// File-backed store keeping one file per key under a directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.dir.join(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = fs::create_dir_all(&self.dir) {
            warn!("failed to create storage dir {:?}: {err}", self.dir);
            return;
        }
        if let Err(err) = fs::write(self.dir.join(key), value) {
            warn!("failed to persist {key:?}: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing"), None);
        store.set("key", "value");
        assert_eq!(store.get("key").as_deref(), Some("value"));
        store.set("key", "updated");
        assert_eq!(store.get("key").as_deref(), Some("updated"));
    }

    #[test]
    fn test_file_store_missing_key_is_none() {
        let store = FileStore::new(std::env::temp_dir().join("gpui_elements_theme_absent"));
        assert_eq!(store.get("never-written"), None);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join("gpui_elements_theme_store_test");
        let store = FileStore::new(&dir);
        store.set("selection", r#"{"themeId":"bandley"}"#);
        assert_eq!(
            store.get("selection").as_deref(),
            Some(r#"{"themeId":"bandley"}"#)
        );
        let _ = fs::remove_dir_all(&dir);
    }
}
