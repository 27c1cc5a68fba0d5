//! Cart persistence.

use crate::cart::{Cart, LineItem, RingSize, StoredLineItem};
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use bijou_cache::{Cache, KeyValueStore};

/// Storage key the cart lives under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "cart";

/// A cart mirrored 1:1 into a key-value store.
///
/// The whole cart is written as a JSON array of [`StoredLineItem`] after
/// every mutation. There is no versioning; the last write wins.
///
/// # Example
///
/// ```rust
/// use bijou_cache::MemoryStore;
/// use bijou_commerce::prelude::*;
///
/// let mut store = CartStore::new(MemoryStore::new(), "cart", Currency::EUR);
/// store.add("Ring A", 49.99, "7", 2, "/shop/ring-a").unwrap();
/// store.add("Ring A", 49.99, "7", 1, "/shop/ring-a").unwrap();
///
/// assert_eq!(store.cart().len(), 1);
/// assert_eq!(store.cart().items()[0].quantity, 3);
/// ```
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    cache: Cache<S>,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store holding an empty cart. Nothing is read until
    /// [`load`](Self::load).
    pub fn new(store: S, key: impl Into<String>, currency: Currency) -> Self {
        Self {
            cart: Cart::new(currency),
            cache: Cache::new(store),
            key: key.into(),
        }
    }

    /// Replace the in-memory cart with the persisted one.
    ///
    /// Returns the number of restored lines. An absent key leaves the cart
    /// as it is. An unreadable value is an error and also leaves the cart
    /// untouched.
    pub fn load(&mut self) -> Result<usize, CommerceError> {
        match self.cache.get::<Vec<StoredLineItem>>(&self.key)? {
            Some(items) => {
                self.cart = Cart::from_stored(items, self.cart.currency());
                tracing::debug!(key = %self.key, lines = self.cart.len(), "cart restored");
                Ok(self.cart.len())
            }
            None => Ok(0),
        }
    }

    /// Write the whole cart.
    pub fn save(&self) -> Result<(), CommerceError> {
        self.cache.set(&self.key, &self.cart.to_stored())?;
        Ok(())
    }

    /// Add an item, merging with an existing `(name, ring_size)` line, then
    /// save. `price` is a decimal amount in the cart currency.
    ///
    /// A failed save leaves the in-memory cart changed; the error only means
    /// storage is behind.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        price: f64,
        ring_size: impl Into<RingSize>,
        quantity: i64,
        link: impl Into<String>,
    ) -> Result<usize, CommerceError> {
        let unit_price = Money::from_decimal(price, self.cart.currency());
        let index = self
            .cart
            .add_item(name, unit_price, ring_size.into(), quantity, link)?;
        self.save()?;
        Ok(index)
    }

    /// Remove the line at `index`, then save.
    ///
    /// Out of range is a no-op returning `None`.
    pub fn remove(&mut self, index: usize) -> Result<Option<LineItem>, CommerceError> {
        let removed = self.cart.remove(index);
        if removed.is_none() {
            tracing::debug!(index, lines = self.cart.len(), "remove ignored, index out of range");
        }
        self.save()?;
        Ok(removed)
    }

    /// Empty the cart and erase the persisted copy.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.cart.clear();
        self.erase()
    }

    /// Erase the persisted copy without touching the in-memory cart.
    pub fn erase(&self) -> Result<(), CommerceError> {
        self.cache.delete(&self.key)?;
        Ok(())
    }

    /// The in-memory cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    pub fn len(&self) -> usize {
        self.cart.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying cache.
    pub fn cache(&self) -> &Cache<S> {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bijou_cache::MemoryStore;

    fn store(backend: &MemoryStore) -> CartStore<MemoryStore> {
        CartStore::new(backend.clone(), DEFAULT_CART_KEY, Currency::EUR)
    }

    #[test]
    fn test_add_persists() {
        let backend = MemoryStore::new();
        let mut cart = store(&backend);
        cart.add("Ring A", 49.99, "7", 2, "/shop/ring-a").unwrap();

        let raw = backend.get_raw(DEFAULT_CART_KEY).unwrap().unwrap();
        let stored: Vec<StoredLineItem> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].quantity, 2);
        assert_eq!(stored[0].price, 49.99);
    }

    #[test]
    fn test_load_reproduces_cart() {
        let backend = MemoryStore::new();
        let mut first = store(&backend);
        first.add("Ring A", 49.99, "7", 2, "/a").unwrap();
        first.add("Necklace", 120.0, "0", 1, "/b").unwrap();

        let mut second = store(&backend);
        assert_eq!(second.load().unwrap(), 2);
        assert_eq!(second.cart(), first.cart());
    }

    #[test]
    fn test_load_missing_key() {
        let mut cart = store(&MemoryStore::new());
        assert_eq!(cart.load().unwrap(), 0);
        assert!(cart.cart().is_empty());
    }

    #[test]
    fn test_load_corrupt_value() {
        let backend = MemoryStore::new();
        let mut cart = store(&backend);
        cart.add("Ring A", 10.0, "7", 1, "").unwrap();
        backend.set_raw(DEFAULT_CART_KEY, "[{\"name\":").unwrap();

        assert!(matches!(cart.load(), Err(CommerceError::Storage(_))));
        assert_eq!(cart.cart().len(), 1);

        cart.erase().unwrap();
        assert!(!backend.exists(DEFAULT_CART_KEY).unwrap());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut cart = store(&MemoryStore::new());
        cart.add("Ring A", 10.0, "7", 1, "").unwrap();
        assert!(cart.remove(3).unwrap().is_none());
        assert_eq!(cart.cart().len(), 1);
    }

    #[test]
    fn test_clear_erases_storage() {
        let backend = MemoryStore::new();
        let mut cart = store(&backend);
        cart.add("Ring A", 10.0, "7", 1, "").unwrap();

        cart.clear().unwrap();
        assert!(cart.cart().is_empty());
        assert!(!backend.exists(DEFAULT_CART_KEY).unwrap());
    }

    #[test]
    fn test_zero_quantity_is_saved() {
        let backend = MemoryStore::new();
        let mut cart = store(&backend);
        cart.add("Ring A", 10.0, "7", 0, "").unwrap();

        let raw = backend.get_raw(DEFAULT_CART_KEY).unwrap().unwrap();
        let stored: Vec<StoredLineItem> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored[0].quantity, 0);
    }

    #[test]
    fn test_failed_merge_does_not_save() {
        let backend = MemoryStore::new();
        let mut cart = store(&backend);
        cart.add("Ring A", 10.0, "7", i64::MAX, "").unwrap();
        let before = backend.get_raw(DEFAULT_CART_KEY).unwrap();

        assert!(matches!(
            cart.add("Ring A", 10.0, "7", 1, ""),
            Err(CommerceError::Overflow)
        ));
        assert_eq!(backend.get_raw(DEFAULT_CART_KEY).unwrap(), before);
    }
}
