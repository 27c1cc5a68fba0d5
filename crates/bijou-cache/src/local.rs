//! Browser `localStorage` backend.

use crate::{CacheError, KeyValueStore};

/// `window.localStorage`, per origin, surviving page reloads.
///
/// Resolved on every call so a storage that becomes unavailable (private
/// mode, quota policy) surfaces as [`CacheError::Unavailable`] instead of a
/// panic.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    /// Open the origin's local storage.
    pub fn open() -> Self {
        Self
    }

    fn raw() -> Result<web_sys::Storage, CacheError> {
        let window =
            web_sys::window().ok_or_else(|| CacheError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| CacheError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| CacheError::Unavailable("localStorage is disabled".to_string()))
    }
}

impl KeyValueStore for LocalStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        Self::raw()?
            .get_item(key)
            .map_err(|e| CacheError::Store(format!("{:?}", e)))
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), CacheError> {
        Self::raw()?
            .set_item(key, value)
            .map_err(|e| CacheError::Store(format!("{:?}", e)))
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        Self::raw()?
            .remove_item(key)
            .map_err(|e| CacheError::Store(format!("{:?}", e)))
    }
}
