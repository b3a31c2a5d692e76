//! Durable key-value slots for the cart.
//!
//! The cart is read and written wholesale as one string per slot, the same
//! way browser local storage or device storage behaves. Two implementations:
//!
//! - [`MemoryStorage`] - process memory, used by tests and ephemeral runs
//! - [`FileStorage`] - one JSON file per slot under a data directory

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Errors raised by a [`SlotStorage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying file or device failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// The cart could not be serialized.
    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The value is larger than the backend accepts.
    #[error("storage quota exceeded: {size} bytes (limit {limit})")]
    QuotaExceeded { size: usize, limit: usize },

    /// The slot name cannot be mapped onto this backend.
    #[error("invalid slot key: {0:?}")]
    InvalidKey(String),

    /// The backend refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A string-valued key-value store with whole-value reads and writes.
pub trait SlotStorage: Send + Sync {
    /// Read the value in `key`, or `None` if the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value in `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the value was not durably stored.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory slots.
///
/// Can be told to reject writes or enforce a size limit so callers can
/// exercise their write-failure paths.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    quota: Option<usize>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any value longer than `limit` bytes.
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::default()
        }
    }

    /// Make every subsequent `set` fail until switched back.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl SlotStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        if let Some(limit) = self.quota
            && value.len() > limit
        {
            return Err(StorageError::QuotaExceeded {
                size: value.len(),
                limit,
            });
        }
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// File-backed slots: `<dir>/<key>.json`.
///
/// Writes go to a temporary sibling file that is then renamed over the slot,
/// so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Slots live under `dir`, which is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !is_valid_slot_name(key) {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

/// Whether `key` maps onto a file name: non-empty ASCII letters, digits, `-`
/// and `_`.
#[must_use]
pub fn is_valid_slot_name(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
}

impl SlotStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        std::fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("json.tmp");
        {
            let mut file = std::fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_get_set() {
        let storage = MemoryStorage::new();
        assert!(storage.get("wineCart").unwrap().is_none());

        storage.set("wineCart", "[]").unwrap();
        assert_eq!(storage.get("wineCart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_memory_storage_fail_writes() {
        let storage = MemoryStorage::new();
        storage.set("wineCart", "[1]").unwrap();
        storage.set_fail_writes(true);

        let err = storage.set("wineCart", "[2]").unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
        assert_eq!(storage.get("wineCart").unwrap().as_deref(), Some("[1]"));

        storage.set_fail_writes(false);
        storage.set("wineCart", "[2]").unwrap();
        assert_eq!(storage.get("wineCart").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn test_memory_storage_quota() {
        let storage = MemoryStorage::with_quota(4);
        storage.set("k", "[]").unwrap();
        let err = storage.set("k", "[1,2,3]").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded { size: 7, limit: 4 }
        ));
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("carts");
        let storage = FileStorage::new(&dir);

        assert!(storage.get("wineCart").unwrap().is_none());
        storage.set("wineCart", "[{\"id\":\"1\"}]").unwrap();
        storage.set("wineCart", "[]").unwrap();

        assert_eq!(storage.get("wineCart").unwrap().as_deref(), Some("[]"));
        assert!(dir.join("wineCart.json").exists());
        assert!(!dir.join("wineCart.json.tmp").exists());
    }

    #[test]
    fn test_file_storage_rejects_path_like_keys() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path());
        assert!(matches!(
            storage.set("../escape", "[]"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(storage.get(""), Err(StorageError::InvalidKey(_))));
    }
}
