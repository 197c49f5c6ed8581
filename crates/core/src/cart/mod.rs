//! Client-side shopping cart.
//!
//! The cart is an append-only sequence of [`CartEntry`] values serialized as a
//! JSON array under [`CART_KEY`]. Adding the same product twice yields two
//! entries; removing a product drops every entry for it. Reads fail soft: a
//! missing or unparsable value is an empty cart.

pub mod storage;
pub mod summary;

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

pub use storage::{CartStorage, CartStorageError, MemoryStorage};
pub use summary::{CartLine, CartSummary, quantities};

/// Storage key holding the serialized cart.
pub const CART_KEY: &str = "utp_marketplace_cart";

/// One unit-add event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: ProductId,
    /// Unix timestamp in milliseconds. Zero when the stored entry has none.
    #[serde(rename = "addedAt", default)]
    pub added_at: i64,
}

/// Cart state on top of a [`CartStorage`] port.
///
/// Every mutation reads the current state fresh, applies the change and
/// writes it back, returning the new entry count for badge display.
#[derive(Debug)]
pub struct Cart<S> {
    storage: S,
}

impl<S: CartStorage> Cart<S> {
    /// Wrap a storage backend.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Current entries. Unreadable or corrupted storage yields an empty cart.
    pub fn entries(&self) -> Vec<CartEntry> {
        let raw = match self.storage.get(CART_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "cart storage unreadable, treating as empty");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "cart storage corrupted, treating as empty");
            Vec::new()
        })
    }

    /// Number of entries (not distinct products).
    pub fn count(&self) -> usize {
        self.entries().len()
    }

    /// Returns true if the cart has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Quantity per distinct product, in ascending id order.
    pub fn quantities(&self) -> Vec<(ProductId, u32)> {
        quantities(&self.entries())
    }

    /// Append an entry stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    pub fn add(&mut self, id: ProductId) -> Result<usize, CartStorageError> {
        self.add_at(id, chrono::Utc::now().timestamp_millis())
    }

    /// Append an entry with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    pub fn add_at(&mut self, id: ProductId, added_at: i64) -> Result<usize, CartStorageError> {
        let mut entries = self.entries();
        entries.push(CartEntry { id, added_at });
        self.save(&entries)?;
        tracing::debug!(product_id = %id, count = entries.len(), "added to cart");
        Ok(entries.len())
    }

    /// Drop every entry for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    pub fn remove(&mut self, id: ProductId) -> Result<usize, CartStorageError> {
        let mut entries = self.entries();
        entries.retain(|entry| entry.id != id);
        self.save(&entries)?;
        Ok(entries.len())
    }

    /// Erase the stored cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage key cannot be removed.
    pub fn clear(&mut self) -> Result<(), CartStorageError> {
        self.storage.clear(CART_KEY)
    }

    /// The storage backend.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn save(&mut self, entries: &[CartEntry]) -> Result<(), CartStorageError> {
        let raw = serde_json::to_string(entries)
            .map_err(|e| CartStorageError::Corrupted(e.to_string()))?;
        self.storage.set(CART_KEY, &raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cart() -> Cart<MemoryStorage> {
        Cart::new(MemoryStorage::new())
    }

    #[test]
    fn test_add_appends_duplicates() {
        let mut cart = cart();
        assert_eq!(cart.add(ProductId::new(1)).unwrap(), 1);
        assert_eq!(cart.add(ProductId::new(1)).unwrap(), 2);
        assert_eq!(cart.quantities(), vec![(ProductId::new(1), 2)]);
    }

    #[test]
    fn test_remove_drops_all_matching_entries() {
        let mut cart = cart();
        for _ in 0..3 {
            cart.add(ProductId::new(5)).unwrap();
        }
        assert_eq!(cart.remove(ProductId::new(5)).unwrap(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_keeps_other_products() {
        let mut cart = cart();
        cart.add(ProductId::new(1)).unwrap();
        cart.add(ProductId::new(2)).unwrap();
        cart.add(ProductId::new(1)).unwrap();
        assert_eq!(cart.remove(ProductId::new(1)).unwrap(), 1);
        assert_eq!(cart.entries()[0].id, ProductId::new(2));
    }

    #[test]
    fn test_clear_removes_key() {
        let mut cart = cart();
        cart.add(ProductId::new(1)).unwrap();
        cart.clear().unwrap();
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.storage().get(CART_KEY).unwrap(), None);
    }

    #[test]
    fn test_corrupted_storage_is_empty() {
        let cart = Cart::new(MemoryStorage::with_value(CART_KEY, "{not json"));
        assert!(cart.entries().is_empty());
    }

    #[test]
    fn test_add_over_corrupted_storage_recovers() {
        let mut cart = Cart::new(MemoryStorage::with_value(CART_KEY, "[{\"id\":"));
        assert_eq!(cart.add(ProductId::new(3)).unwrap(), 1);
    }

    #[test]
    fn test_serialized_shape() {
        let mut cart = cart();
        cart.add_at(ProductId::new(9), 1_700_000_000_000).unwrap();
        let raw = cart.storage().get(CART_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"[{"id":9,"addedAt":1700000000000}]"#);
    }

    #[test]
    fn test_entries_without_timestamp_are_kept() {
        let mut cart = Cart::new(MemoryStorage::with_value(
            CART_KEY,
            r#"[{"id":1},{"id":2,"addedAt":5}]"#,
        ));
        assert_eq!(cart.quantities(), vec![(ProductId::new(1), 1), (ProductId::new(2), 1)]);
        assert_eq!(cart.entries()[0].added_at, 0);

        assert_eq!(cart.add(ProductId::new(1)).unwrap(), 3);
        assert_eq!(cart.quantities()[0], (ProductId::new(1), 2));
    }
}
