//! Key/value storage backends
//!
//! Writes are fire-and-forget: failures are logged and dropped.

use std::collections::HashMap;

/// Minimal string store keyed by fixed identifiers
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-process store (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// One file per key inside a data directory (native)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> std::path::PathBuf {
        self.dir.join(key)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            log::warn!("Could not create {}: {}", self.dir.display(), e);
            return;
        }
        if let Err(e) = std::fs::write(self.path(key), value) {
            log::warn!("Could not save {}: {}", key, e);
        }
    }
}

/// Browser LocalStorage (wasm)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&mut self, key: &str, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    log::warn!("LocalStorage write failed for {}", key);
                }
            }
            None => log::warn!("LocalStorage unavailable, {} not saved", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "3");
        assert_eq!(store.get("k").as_deref(), Some("3"));
        store.set("k", "4");
        assert_eq!(store.get("k").as_deref(), Some("4"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_creates_dir() {
        let dir = std::env::temp_dir().join(format!("fruit-helix-test-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let mut store = FileStore::new(&dir);
        assert_eq!(store.get("progress"), None);
        store.set("progress", "2");
        assert_eq!(store.get("progress").as_deref(), Some("2"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
