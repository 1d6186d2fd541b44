//! # Key-Value Storage Backends
//!
//! The persistence transport is a flat key-value interface: string keys to
//! string values, get/set only. The document lives under one key and each
//! UI preference under its own independent key. There is no schema
//! versioning and no migration path; values are opaque JSON text.
//!
//! Two backends are provided:
//! - [`MemoryStorage`] - a HashMap, for tests and ephemeral sessions
//! - [`DirStorage`] - one file per key under a root directory

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::StoreResult;

// =============================================================================
// Storage Trait
// =============================================================================

/// A flat string key-value store.
pub trait Storage: Send {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// Shared handle to a storage backend.
///
/// The document store and the preference accessors hold clones of the same
/// handle, so everything lands in one backend.
pub type SharedStorage = Arc<Mutex<dyn Storage>>;

/// Wraps a backend into a [`SharedStorage`] handle.
pub fn shared(storage: impl Storage + 'static) -> SharedStorage {
    Arc::new(Mutex::new(storage))
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-memory backend. Contents die with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// Directory Storage
// =============================================================================

/// File-per-key backend under a root directory.
///
/// Key `tillbook.data` becomes `<root>/tillbook.data.json`. Keys are fixed
/// constants chosen by this crate, so they are always valid file names.
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    /// Creates a backend rooted at `root`. The directory is created lazily
    /// on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirStorage { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Storage for DirStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(key);
        debug!(path = %path.display(), "Writing storage key");
        fs::write(path, value)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    pub(crate) fn scratch_dir(label: &str) -> PathBuf {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "tillbook-test-{}-{}-{}",
            label,
            std::process::id(),
            n
        ))
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("missing").unwrap(), None);

        storage.set("k", "v1").unwrap();
        storage.set("k", "v2").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_dir_storage_round_trip() {
        let root = scratch_dir("dir-storage");
        let mut storage = DirStorage::new(&root);

        assert_eq!(storage.get("tillbook.data").unwrap(), None);

        storage.set("tillbook.data", "{\"clients\":[]}").unwrap();
        assert_eq!(
            storage.get("tillbook.data").unwrap().as_deref(),
            Some("{\"clients\":[]}")
        );

        // A second instance over the same root sees the same value
        let reopened = DirStorage::new(&root);
        assert!(reopened.get("tillbook.data").unwrap().is_some());

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_shared_handle_is_one_backend() {
        let handle = shared(MemoryStorage::new());
        handle.lock().unwrap().set("k", "v").unwrap();

        let clone = Arc::clone(&handle);
        assert_eq!(clone.lock().unwrap().get("k").unwrap().as_deref(), Some("v"));
    }
}
