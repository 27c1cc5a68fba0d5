//! Cart, pricing and checkout logic for the Bijou jewelry storefront.
//!
//! This crate holds everything the storefront decides without touching the
//! page:
//!
//! - **Cart**: line items keyed by name and ring size, totals, and a store
//!   that mirrors the cart into key-value storage
//! - **Checkout**: the payment provider's order body and the post-approval
//!   capture/notify/clear flow
//! - **Catalog**: the category filter for product teasers
//!
//! # Example
//!
//! ```rust
//! use bijou_cache::MemoryStore;
//! use bijou_commerce::prelude::*;
//!
//! let mut store = CartStore::new(MemoryStore::new(), DEFAULT_CART_KEY, Currency::EUR);
//! store.add("Ring A", 49.99, "7", 2, "/shop/ring-a").unwrap();
//! store.add("Ring A", 49.99, "7", 1, "/shop/ring-a").unwrap();
//!
//! let totals = store.cart().totals(Money::new(490, Currency::EUR)).unwrap();
//! assert_eq!(totals.item_total.display_trailing(), "149.97\u{20ac}");
//! assert_eq!(totals.grand_total.display_amount(), "154.87");
//! ```

pub mod error;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{
        Cart, CartStore, CartTotals, LineItem, RingSize, StoredLineItem, DEFAULT_CART_KEY,
    };

    // Checkout
    pub use crate::checkout::{
        ApprovalFlow, CaptureDetails, CheckoutOutcome, ClearPolicy, NotificationStatus,
        OrderNotification, OrderNotifier, OrderRequest, PaymentGateway,
    };

    // Catalog
    pub use crate::catalog::CategoryFilter;
}
