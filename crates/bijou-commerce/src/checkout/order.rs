//! Order descriptions in the payment provider's schema.
//!
//! Mirrors the `purchase_units` body PayPal's `actions.order.create`
//! expects. All amounts come from [`CartTotals`], never from rendered text.

use crate::cart::{Cart, CartTotals, LineItem};
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Longest item name the provider accepts.
pub const MAX_ITEM_NAME_CHARS: usize = 127;

/// An amount as the provider writes it: currency code plus a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountValue {
    pub currency_code: String,
    pub value: String,
}

impl From<Money> for AmountValue {
    fn from(money: Money) -> Self {
        Self {
            currency_code: money.currency.code().to_string(),
            value: money.display_amount(),
        }
    }
}

/// Breakdown of the purchase unit amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountBreakdown {
    pub item_total: AmountValue,
    pub shipping: AmountValue,
}

/// Purchase unit amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAmount {
    pub currency_code: String,
    pub value: String,
    pub breakdown: AmountBreakdown,
}

/// A line of the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub unit_amount: AmountValue,
    pub quantity: String,
}

impl OrderItem {
    /// Map a cart line, e.g. name `"Ring A (Size: 7)"`.
    pub fn from_line(item: &LineItem) -> Self {
        let mut name = item.display_name();
        if let Some((cut, _)) = name.char_indices().nth(MAX_ITEM_NAME_CHARS) {
            name.truncate(cut);
        }
        Self {
            name,
            unit_amount: item.unit_price.into(),
            quantity: item.quantity.to_string(),
        }
    }
}

/// One purchase unit: the whole cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseUnit {
    pub amount: OrderAmount,
    pub items: Vec<OrderItem>,
}

/// The body passed to the provider when the buyer starts checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub purchase_units: Vec<PurchaseUnit>,
}

impl OrderRequest {
    /// Describe `cart` with the given shipping surcharge.
    pub fn from_cart(cart: &Cart, shipping: Money) -> Result<Self, CommerceError> {
        let totals = cart.totals(shipping)?;
        Ok(Self::from_totals(cart, &totals))
    }

    /// Describe `cart` with already computed totals.
    pub fn from_totals(cart: &Cart, totals: &CartTotals) -> Self {
        let amount = OrderAmount {
            currency_code: totals.grand_total.currency.code().to_string(),
            value: totals.grand_total.display_amount(),
            breakdown: AmountBreakdown {
                item_total: totals.item_total.into(),
                shipping: totals.shipping.into(),
            },
        };
        Self {
            purchase_units: vec![PurchaseUnit {
                amount,
                items: cart.items().iter().map(OrderItem::from_line).collect(),
            }],
        }
    }
}
