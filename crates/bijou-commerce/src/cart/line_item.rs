//! Line items and their storage shape.

use crate::money::{Currency, Money};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Smallest and largest ring size the shop sells.
pub const RING_SIZE_RANGE: (f64, f64) = (3.0, 24.0);

/// A ring size code, e.g. `"7"` or `"7.5"`.
///
/// Sizes are compared as strings after trimming. Stored carts may hold the
/// size as a JSON number, so deserialization accepts both forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RingSize(String);

impl RingSize {
    /// Create a size from its code.
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.len() == code.len() {
            Self(code)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Create a size from a numeric code; whole numbers drop the fraction.
    pub fn from_number(value: f64) -> Self {
        if value.fract() == 0.0 && value.abs() < 1e15 {
            Self(format!("{}", value as i64))
        } else {
            Self(value.to_string())
        }
    }

    /// Get the size code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the code is a number within the sizes the shop sells.
    ///
    /// Informative only: carts accept any code.
    pub fn is_standard(&self) -> bool {
        let (min, max) = RING_SIZE_RANGE;
        self.0
            .parse::<f64>()
            .map(|n| (min..=max).contains(&n))
            .unwrap_or(false)
    }
}

impl fmt::Display for RingSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RingSize {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RingSize {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl Serialize for RingSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RingSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RingSizeVisitor;

        impl Visitor<'_> for RingSizeVisitor {
            type Value = RingSize;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a ring size as a string or a number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RingSize, E> {
                Ok(RingSize::new(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<RingSize, E> {
                Ok(RingSize(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<RingSize, E> {
                Ok(RingSize(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<RingSize, E> {
                Ok(RingSize::from_number(v))
            }
        }

        deserializer.deserialize_any(RingSizeVisitor)
    }
}

/// A line item in the cart.
///
/// Identified by `(name, ring_size)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Product name.
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Ring size variant.
    pub ring_size: RingSize,
    /// Quantity.
    pub quantity: i64,
    /// Product page the item was added from.
    pub link: String,
}

impl LineItem {
    /// Check if this item has the given identity.
    pub fn matches(&self, name: &str, ring_size: &RingSize) -> bool {
        self.name == name && &self.ring_size == ring_size
    }

    /// Unit price × quantity, `None` on overflow.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.try_multiply(self.quantity)
    }

    /// Name with the size, e.g. `"Ring A (Size: 7)"`.
    pub fn display_name(&self) -> String {
        format!("{} (Size: {})", self.name, self.ring_size)
    }

    /// Rebuild from the storage shape.
    pub fn from_stored(stored: StoredLineItem, currency: Currency) -> Self {
        Self {
            name: stored.name,
            unit_price: Money::from_decimal(stored.price, currency),
            ring_size: stored.ring_size,
            quantity: stored.quantity,
            link: stored.link,
        }
    }
}

/// The persisted and notified shape of a line item:
/// `{"name", "price", "ringSize", "quantity", "link"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLineItem {
    pub name: String,
    pub price: f64,
    pub ring_size: RingSize,
    pub quantity: i64,
    #[serde(default)]
    pub link: String,
}

impl From<&LineItem> for StoredLineItem {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.unit_price.to_decimal(),
            ring_size: item.ring_size.clone(),
            quantity: item.quantity,
            link: item.link.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_size_from_string_or_number() {
        let from_str: RingSize = serde_json::from_str("\"7\"").unwrap();
        let from_int: RingSize = serde_json::from_str("7").unwrap();
        let from_half: RingSize = serde_json::from_str("7.5").unwrap();

        assert_eq!(from_str, from_int);
        assert_eq!(from_half.as_str(), "7.5");
        assert_eq!(serde_json::to_string(&from_int).unwrap(), "\"7\"");
    }

    #[test]
    fn test_ring_size_trims() {
        assert_eq!(RingSize::new(" 12 "), RingSize::new("12"));
    }

    #[test]
    fn test_ring_size_standard_range() {
        assert!(RingSize::new("3").is_standard());
        assert!(RingSize::new("24").is_standard());
        assert!(RingSize::new("10.5").is_standard());
        assert!(!RingSize::new("2").is_standard());
        assert!(!RingSize::new("25").is_standard());
        assert!(!RingSize::new("M").is_standard());
    }

    #[test]
    fn test_stored_shape() {
        let item = LineItem {
            name: "Ring A".to_string(),
            unit_price: Money::new(4999, Currency::EUR),
            ring_size: RingSize::new("7"),
            quantity: 2,
            link: "/shop/ring-a".to_string(),
        };
        let json = serde_json::to_value(StoredLineItem::from(&item)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Ring A",
                "price": 49.99,
                "ringSize": "7",
                "quantity": 2,
                "link": "/shop/ring-a"
            })
        );
    }

    #[test]
    fn test_from_stored_without_link() {
        let stored: StoredLineItem =
            serde_json::from_str(r#"{"name":"Band","price":120,"ringSize":9,"quantity":1}"#)
                .unwrap();
        let item = LineItem::from_stored(stored, Currency::EUR);
        assert_eq!(item.unit_price.amount_cents, 12000);
        assert_eq!(item.ring_size.as_str(), "9");
        assert!(item.link.is_empty());
        assert_eq!(item.display_name(), "Band (Size: 9)");
    }
}
