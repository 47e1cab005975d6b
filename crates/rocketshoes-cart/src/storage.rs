//! # Storage
//!
//! Local persistence of the cart.
//!
//! ## Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storage Layers                                  │
//! │                                                                         │
//! │  CartRepository                                                         │
//! │  • key = "<namespace>:cart"                                             │
//! │  • value = JSON array of products                                       │
//! │  • validates on load (amount >= 1, unique ids)                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  trait KeyValueStore   get(key) / set(key, value), string values       │
//! │  ├── MemoryStore       HashMap, lives for the session                  │
//! │  └── FileStore         JSON object on disk, temp file + rename         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes are synchronous: a cart is small and the store is local.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rocketshoes_core::{cart_storage_key, Cart};
use tracing::{debug, info, warn};

use crate::error::{StorageError, StorageResult};

// =============================================================================
// Key-Value Store
// =============================================================================

/// String key-value persistence, shaped like browser local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// Session-only store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock().expect("MemoryStore mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().expect("MemoryStore mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store kept in a single JSON object file.
///
/// ## Write Strategy
/// Every `set` rewrites the whole file through `<file>.tmp` and a rename,
/// so a crash mid-write leaves the previous contents intact.
///
/// ## Corrupt Files
/// `get` reports a file that is not a JSON object as `CorruptStore`. `set`
/// replaces such a file with a fresh object holding only the new entry.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Opens (without reading) the store at `path`. Parent directories are
    /// created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> StorageResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| StorageError::CorruptStore(e.to_string()))
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.lock.lock().expect("FileStore mutex poisoned");
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.lock.lock().expect("FileStore mutex poisoned");
        let mut entries = match self.read_entries() {
            Err(StorageError::CorruptStore(reason)) => {
                warn!(path = ?self.path, %reason, "Replacing corrupt storage file");
                BTreeMap::new()
            }
            other => other?,
        };
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }
}

// =============================================================================
// Cart Repository
// =============================================================================

/// Reads and writes the cart under its namespaced key.
pub struct CartRepository {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl CartRepository {
    pub fn new(store: impl KeyValueStore + 'static, namespace: &str) -> Self {
        CartRepository {
            store: Box::new(store),
            key: cart_storage_key(namespace),
        }
    }

    /// The storage key, e.g. `@RocketShoes:cart`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the persisted cart.
    ///
    /// ## Returns
    /// - `Ok(None)` if nothing was ever saved
    /// - `Err(InvalidCart)` if the stored value is not a valid cart
    pub fn load(&self) -> StorageResult<Option<Cart>> {
        let Some(raw) = self.store.get(&self.key)? else {
            debug!(key = %self.key, "No persisted cart");
            return Ok(None);
        };

        let cart: Cart = serde_json::from_str(&raw).map_err(|e| StorageError::InvalidCart {
            key: self.key.clone(),
            reason: e.to_string(),
        })?;

        info!(key = %self.key, items = cart.len(), "Loaded persisted cart");
        Ok(Some(cart))
    }

    /// Writes the full cart.
    pub fn save(&self, cart: &Cart) -> StorageResult<()> {
        let raw = serde_json::to_string(cart)?;
        self.store.set(&self.key, &raw)?;
        debug!(key = %self.key, items = cart.len(), "Persisted cart");
        Ok(())
    }
}

impl std::fmt::Debug for CartRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartRepository").field("key", &self.key).finish()
    }
}
