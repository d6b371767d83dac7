//! Durable client state store
//!
//! String-keyed key-value persistence with JSON-serialized values. The store
//! is constructor-injected everywhere (no globals): production code uses
//! [`DiskStore`], tests substitute [`MemoryStore`]. Every write is
//! immediately durable and immediately visible to subsequent reads — a
//! reload never loses the latest write. Corrupt persisted data is treated as
//! absent, never as an error.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Well-known store keys
pub mod keys {
    /// Currently selected provider name (plain string value)
    pub const SELECTED_PROVIDER: &str = "selectedProvider";
    /// Recently-viewed list (JSON array of entries, newest first)
    pub const VIEWED: &str = "viewed";
    /// Wishlist membership (JSON array of entries)
    pub const WISHLIST: &str = "wishlist";
    /// Per-series continue-watching cursor, completed by the series id
    pub const CONTINUE_PREFIX: &str = "continue_";
}

/// Durable string-keyed store
pub trait PersistenceStore: Send + Sync {
    /// Read a value; `None` when the key was never written
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value durably before returning
    fn set(&self, key: &str, value: &str);
}

/// Read and deserialize a JSON value; corrupt data logs a warning and reads
/// as absent
pub fn get_json<T: DeserializeOwned>(store: &dyn PersistenceStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("corrupt state under key '{}', treating as absent: {}", key, e);
            None
        }
    }
}

/// Serialize and write a JSON value
pub fn set_json<T: Serialize>(store: &dyn PersistenceStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(e) => warn!("failed to serialize state for key '{}': {}", key, e),
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for injection points taking `Arc<dyn PersistenceStore>`
    pub fn shared() -> Arc<dyn PersistenceStore> {
        Arc::new(Self::new())
    }
}

impl PersistenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }
}

/// Disk-backed store: one JSON object file under the state directory.
///
/// The whole map is kept in memory and flushed on every write via temp file
/// plus atomic rename, so readers never observe a partial file. A corrupt or
/// missing state file starts the store empty.
pub struct DiskStore {
    path: PathBuf,
    tmp_path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl DiskStore {
    /// Open (or create) the state file in `state_dir`
    pub fn open(state_dir: &str) -> Result<Self> {
        let dir = PathBuf::from(state_dir);
        fs::create_dir_all(&dir)?;

        let path = dir.join("state.json");
        let tmp_path = dir.join("state.json.tmp");

        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(map) => map,
                Err(e) => {
                    warn!("corrupt state file {}, starting empty: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Ok(Self {
            path,
            tmp_path,
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &HashMap<String, String>) {
        let content = match serde_json::to_string_pretty(entries) {
            Ok(content) => content,
            Err(e) => {
                warn!("failed to serialize state file: {}", e);
                return;
            }
        };

        if let Err(e) = fs::write(&self.tmp_path, content) {
            warn!("failed to write state file {}: {}", self.tmp_path.display(), e);
            return;
        }

        // Atomic replace so readers never see a partial write
        if let Err(e) = fs::rename(&self.tmp_path, &self.path) {
            warn!("failed to replace state file {}: {}", self.path.display(), e);
        }
    }
}

impl PersistenceStore for DiskStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries);
    }
}
