//! The cart: an insertion-ordered list of line items.

use crate::cart::{CartTotals, LineItem, RingSize, StoredLineItem};
use crate::error::CommerceError;
use crate::money::{Currency, Money};

/// A shopping cart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    /// Items in insertion order.
    items: Vec<LineItem>,
    /// Cart currency.
    currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Rebuild a cart from its storage shape.
    pub fn from_stored(items: Vec<StoredLineItem>, currency: Currency) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|item| LineItem::from_stored(item, currency))
                .collect(),
            currency,
        }
    }

    /// The storage shape of every item, in order.
    pub fn to_stored(&self) -> Vec<StoredLineItem> {
        self.items.iter().map(StoredLineItem::from).collect()
    }

    /// Add an item to the cart.
    ///
    /// An item with the same name and ring size gets its quantity increased;
    /// its price and link are left as first added. Returns the index of the
    /// affected line.
    ///
    /// Quantity and price are taken as given, zero and negative included;
    /// only the identity key is enforced.
    ///
    /// Returns an error if the price is in another currency or merging the
    /// quantity overflows.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        unit_price: Money,
        ring_size: RingSize,
        quantity: i64,
        link: impl Into<String>,
    ) -> Result<usize, CommerceError> {
        if quantity <= 0 || unit_price.is_negative() {
            tracing::warn!(
                quantity,
                price = %unit_price.display(),
                "adding line with non-positive quantity or negative price"
            );
        }
        if unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: unit_price.currency.code().to_string(),
            });
        }

        let name = name.into();
        if let Some(index) = self.position(&name, &ring_size) {
            let existing = &mut self.items[index];
            existing.quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            return Ok(index);
        }

        self.items.push(LineItem {
            name,
            unit_price,
            ring_size,
            quantity,
            link: link.into(),
        });
        Ok(self.items.len() - 1)
    }

    /// Remove the item at `index`. Later items move down by one.
    ///
    /// Returns `None` when the index is out of range.
    pub fn remove(&mut self, index: usize) -> Option<LineItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Index of the item with this identity.
    pub fn position(&self, name: &str, ring_size: &RingSize) -> Option<usize> {
        self.items.iter().position(|i| i.matches(name, ring_size))
    }

    /// Get an item by index.
    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// All items in order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get total item count (sum of quantities), saturating at the `i64`
    /// bounds. Restored carts are not re-validated, so the sum may not fit.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Get number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Compute totals with the given shipping surcharge.
    pub fn totals(&self, shipping: Money) -> Result<CartTotals, CommerceError> {
        CartTotals::compute(&self.items, shipping, self.currency)
    }
}
