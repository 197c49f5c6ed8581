//! Key-value storage port backing the cart.
//!
//! Mirrors the shape of browser local storage: string keys, string values,
//! and a whole-key removal. Implementations decide where the bytes live.

use std::collections::HashMap;

/// Errors raised by a [`CartStorage`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum CartStorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing store holds data that cannot be decoded.
    #[error("storage data corrupted: {0}")]
    Corrupted(String),
}

/// Persistent key-value storage used by [`super::Cart`].
pub trait CartStorage {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, CartStorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), CartStorageError>;

    /// Remove `key` entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn clear(&mut self, key: &str) -> Result<(), CartStorageError>;
}

/// In-memory storage, used by tests and short-lived sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a raw value, e.g. to simulate
    /// corrupted content.
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_owned(), value.to_owned());
        Self { values }
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CartStorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CartStorageError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), CartStorageError> {
        self.values.remove(key);
        Ok(())
    }
}
