//! Cart totals.

use crate::cart::LineItem;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Totals shown under the cart and sent to the payment provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of price × quantity over all lines.
    pub item_total: Money,
    /// Shipping surcharge.
    pub shipping: Money,
    /// Item total plus shipping.
    pub grand_total: Money,
    /// Sum of quantities.
    pub item_count: i64,
}

impl CartTotals {
    /// Compute totals for `items`.
    ///
    /// Returns an error if arithmetic overflows or the shipping surcharge is
    /// in another currency.
    pub fn compute(
        items: &[LineItem],
        shipping: Money,
        currency: Currency,
    ) -> Result<Self, CommerceError> {
        if shipping.currency != currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: shipping.currency.code().to_string(),
            });
        }

        let line_totals = items
            .iter()
            .map(|item| item.line_total().ok_or(CommerceError::Overflow))
            .collect::<Result<Vec<_>, _>>()?;

        let item_total =
            Money::try_sum(line_totals.iter(), currency).ok_or(CommerceError::Overflow)?;
        let grand_total = item_total
            .try_add(&shipping)
            .ok_or(CommerceError::Overflow)?;
        let item_count = items
            .iter()
            .try_fold(0_i64, |acc, item| acc.checked_add(item.quantity))
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            item_total,
            shipping,
            grand_total,
            item_count,
        })
    }

    /// Check if anything is in the cart.
    pub fn has_items(&self) -> bool {
        self.item_count > 0
    }
}
