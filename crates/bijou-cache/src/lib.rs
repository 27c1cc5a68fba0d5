//! Typed key-value persistence for the Bijou storefront.
//!
//! Provides a small, ergonomic API for keeping data in a string key-value
//! store (the browser's `localStorage` in production) with automatic JSON
//! serialization.
//!
//! # Example
//!
//! ```rust
//! use bijou_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! cache.set("cart", &vec!["Solitaire"]).unwrap();
//!
//! let items: Option<Vec<String>> = cache.get("cart").unwrap();
//! assert_eq!(items, Some(vec!["Solitaire".to_string()]));
//!
//! cache.delete("cart").unwrap();
//! ```

mod error;
mod kv;
#[cfg(target_arch = "wasm32")]
mod local;

pub use error::CacheError;
pub use kv::{Cache, KeyValueStore, MemoryStore};
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KeyValueStore, MemoryStore};
}
