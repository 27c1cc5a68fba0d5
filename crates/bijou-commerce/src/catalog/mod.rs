//! Catalog module.
//!
//! Category filtering of the product grid.

mod filter;

pub use filter::{CategoryFilter, ACTIVE_CLASS, HIDDEN_CLASS, PASSIVE_CLASS};
