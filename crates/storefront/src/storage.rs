//! File-backed cart storage.
//!
//! Emulates browser local storage with a single JSON object file
//! (`storage.json`) mapping keys to string values. The file is read and
//! rewritten whole on every operation.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use mercado_core::{CartStorage, CartStorageError};

/// Name of the storage file inside the storage directory.
pub const STORAGE_FILE: &str = "storage.json";

/// Key-value storage persisted as one JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage backed by `dir/storage.json`. Nothing is created until the
    /// first write.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(STORAGE_FILE),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, CartStorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&raw).map_err(|e| CartStorageError::Corrupted(e.to_string()))
    }

    fn store(&self, values: &BTreeMap<String, String>) -> Result<(), CartStorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(values)
            .map_err(|e| CartStorageError::Corrupted(e.to_string()))?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl CartStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CartStorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CartStorageError> {
        // An unreadable file is replaced rather than blocking every write.
        let mut values = self.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, path = %self.path.display(), "discarding unreadable storage file");
            BTreeMap::new()
        });
        values.insert(key.to_owned(), value.to_owned());
        self.store(&values)
    }

    fn clear(&mut self, key: &str) -> Result<(), CartStorageError> {
        let mut values = self.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, path = %self.path.display(), "discarding unreadable storage file");
            BTreeMap::new()
        });
        if values.remove(key).is_some() || self.path.exists() {
            self.store(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mercado_core::{Cart, ProductId};

    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::in_dir(dir.path());
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn test_set_get_clear() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::in_dir(dir.path().join("nested"));

        storage.set("a", "1").unwrap();
        storage.set("b", "2").unwrap();
        assert_eq!(storage.get("a").unwrap().as_deref(), Some("1"));

        storage.clear("a").unwrap();
        assert_eq!(storage.get("a").unwrap(), None);
        assert_eq!(storage.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_corrupted_file_is_an_error_but_cart_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(STORAGE_FILE), "not json").unwrap();
        let storage = FileStorage::in_dir(dir.path());

        assert!(matches!(
            storage.get("k"),
            Err(CartStorageError::Corrupted(_))
        ));
        assert!(Cart::new(storage).is_empty());
    }

    #[test]
    fn test_clear_replaces_corrupted_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(STORAGE_FILE), "not json").unwrap();
        let mut storage = FileStorage::in_dir(dir.path());

        storage.clear("k").unwrap();

        assert_eq!(storage.get("k").unwrap(), None);
        let raw = std::fs::read_to_string(storage.path()).unwrap();
        assert_eq!(raw.trim(), "{}");
    }

    #[test]
    fn test_cart_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        let mut cart = Cart::new(FileStorage::in_dir(dir.path()));
        cart.add(ProductId::new(3)).unwrap();
        cart.add(ProductId::new(3)).unwrap();

        let reopened = Cart::new(FileStorage::in_dir(dir.path()));
        assert_eq!(reopened.count(), 2);
        assert_eq!(reopened.quantities(), vec![(ProductId::new(3), 2)]);
    }
}
