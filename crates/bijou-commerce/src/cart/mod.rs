//! Shopping cart module.
//!
//! Contains types for line items, the cart, its totals and its persistent
//! store.

mod cart;
mod line_item;
mod pricing;
mod store;

pub use cart::Cart;
pub use line_item::{LineItem, RingSize, StoredLineItem};
pub use pricing::CartTotals;
pub use store::{CartStore, DEFAULT_CART_KEY};
