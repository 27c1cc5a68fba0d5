//! The cart as the page drives it: store mutations followed by a full
//! re-render.

use std::cell::RefCell;
use std::rc::Rc;

use bijou_cache::KeyValueStore;
use bijou_commerce::cart::{Cart, CartStore, CartTotals, LineItem, RingSize};
use bijou_commerce::checkout::OrderRequest;
use bijou_commerce::{CommerceError, Money};

use crate::error::StorefrontError;
use crate::render::CartRender;
use crate::view::CartView;

/// Controller shared between event handlers and SDK callbacks.
///
/// Never hold a borrow across an `.await`.
pub type SharedController<S, V> = Rc<RefCell<CartController<S, V>>>;

pub struct CartController<S, V> {
    store: CartStore<S>,
    view: V,
}

impl<S: KeyValueStore, V: CartView> CartController<S, V> {
    pub fn new(store: CartStore<S>, view: V) -> Self {
        Self { store, view }
    }

    pub fn into_shared(self) -> SharedController<S, V> {
        Rc::new(RefCell::new(self))
    }

    /// Load the persisted cart and render it.
    ///
    /// An unreadable stored cart is logged, erased and replaced by an empty
    /// one; the page keeps working.
    pub fn restore(&mut self) -> Result<usize, StorefrontError> {
        let restored = match self.store.load() {
            Ok(lines) => lines,
            Err(CommerceError::Storage(e)) => {
                tracing::warn!(error = %e, key = self.store.key(), "discarding unreadable cart");
                if let Err(e) = self.store.erase() {
                    tracing::warn!(error = %e, "could not erase stored cart");
                }
                0
            }
            Err(e) => return Err(e.into()),
        };
        self.refresh()?;
        tracing::info!(lines = restored, "cart restored");
        Ok(restored)
    }

    /// Add an item and re-render. Returns the index of the affected line.
    ///
    /// A failed save still re-renders: the in-memory cart already changed
    /// and the page shows it before the storage error is returned.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        price: f64,
        ring_size: impl Into<RingSize>,
        quantity: i64,
        link: impl Into<String>,
    ) -> Result<usize, StorefrontError> {
        self.view.set_success_visible(false);
        let added = self.store.add(name, price, ring_size, quantity, link);
        self.refresh()?;
        Ok(added?)
    }

    /// Remove the line at `index` and re-render.
    pub fn remove(&mut self, index: usize) -> Result<Option<LineItem>, StorefrontError> {
        let removed = self.store.remove(index);
        self.refresh()?;
        Ok(removed?)
    }

    /// Empty the cart and its stored copy, then re-render.
    pub fn clear(&mut self) -> Result<(), StorefrontError> {
        let cleared = self.store.clear();
        self.refresh()?;
        Ok(cleared?)
    }

    /// Recompute totals with the current shipping field and re-render.
    pub fn refresh(&self) -> Result<CartTotals, StorefrontError> {
        let totals = self.totals()?;
        self.view.show(&CartRender::new(self.store.cart(), &totals));
        Ok(totals)
    }

    /// Totals with the shipping surcharge currently entered on the page.
    pub fn totals(&self) -> Result<CartTotals, StorefrontError> {
        let cart = self.store.cart();
        let shipping_text = self.view.shipping_text().unwrap_or_default();
        let shipping = Money::parse_lenient(&shipping_text, cart.currency());
        Ok(cart.totals(shipping)?)
    }

    /// The payment provider's order body for the current cart.
    pub fn order_request(&self) -> Result<OrderRequest, StorefrontError> {
        let totals = self.totals()?;
        Ok(OrderRequest::from_totals(self.store.cart(), &totals))
    }

    pub fn show_success(&self) {
        self.view.set_success_visible(true);
    }

    pub fn cart(&self) -> &Cart {
        self.store.cart()
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}
