//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    EUR,
    USD,
    GBP,
    CHF,
}

impl Currency {
    /// Get the currency code (e.g., "EUR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::CHF => "CHF",
        }
    }

    /// Get the currency symbol (e.g., "€").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::EUR => "\u{20ac}",
            Currency::USD => "$",
            Currency::GBP => "\u{00a3}",
            Currency::CHF => "CHF",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "EUR" => Some(Currency::EUR),
            "USD" => Some(Currency::USD),
            "GBP" => Some(Currency::GBP),
            "CHF" => Some(Currency::CHF),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// Non-finite input maps to zero.
    ///
    /// ```
    /// use bijou_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::EUR);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        if !amount.is_finite() {
            return Self::zero(currency);
        }
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Parse the leading decimal number of a form field, the way a browser's
    /// `parseFloat` does. Anything that does not start with a number is zero.
    ///
    /// ```
    /// use bijou_commerce::money::{Money, Currency};
    /// assert_eq!(Money::parse_lenient(" 4.90 EUR", Currency::EUR).amount_cents, 490);
    /// assert_eq!(Money::parse_lenient("", Currency::EUR).amount_cents, 0);
    /// ```
    pub fn parse_lenient(text: &str, currency: Currency) -> Self {
        let amount = leading_decimal(text.trim_start()).unwrap_or(0.0);
        Self::from_decimal(amount, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string with a leading symbol (e.g., "€49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format with the symbol after the amount (e.g., "49.99€"), as the
    /// storefront prints line prices.
    pub fn display_trailing(&self) -> String {
        format!("{}{}", self.display_amount(), self.currency.symbol())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let decimal = self.to_decimal();
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", decimal)
    }

    /// Try to add another Money value, returning None if currencies don't
    /// match or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let sum = self.amount_cents.checked_add(other.amount_cents)?;
        Some(Money::new(sum, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let difference = self.amount_cents.checked_sub(other.amount_cents)?;
        Some(Money::new(difference, self.currency))
    }

    /// Multiply by a scalar, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let product = self.amount_cents.checked_mul(factor)?;
        Some(Money::new(product, self.currency))
    }

    /// Sum an iterator of Money values.
    pub fn try_sum<'a>(iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.fold(Some(Money::zero(currency)), |acc, m| acc?.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Longest `[+-]digits[.digits]` prefix of `text`, parsed.
fn leading_decimal(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
            digits += 1;
        }
        if frac_end > end + 1 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    text[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let m = Money::new(4999, Currency::EUR);
        assert_eq!(m.amount_cents, 4999);
        assert_eq!(m.currency, Currency::EUR);
    }

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(49.99, Currency::EUR).amount_cents, 4999);
        assert_eq!(Money::from_decimal(0.1 + 0.2, Currency::EUR).amount_cents, 30);
        assert_eq!(Money::from_decimal(f64::NAN, Currency::EUR).amount_cents, 0);
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(14997, Currency::EUR);
        assert_eq!(m.display(), "\u{20ac}149.97");
        assert_eq!(m.display_trailing(), "149.97\u{20ac}");
        assert_eq!(m.display_amount(), "149.97");

        assert_eq!(Money::new(500, Currency::USD).display(), "$5.00");
    }

    #[test]
    fn test_parse_lenient() {
        let parse = |s: &str| Money::parse_lenient(s, Currency::EUR).amount_cents;
        assert_eq!(parse("4.90"), 490);
        assert_eq!(parse("  12"), 1200);
        assert_eq!(parse("7.5 express"), 750);
        assert_eq!(parse(".5"), 50);
        assert_eq!(parse("5,50"), 500);
        assert_eq!(parse("-3"), -300);
        assert_eq!(parse("free"), 0);
        assert_eq!(parse(""), 0);
        assert_eq!(parse("."), 0);
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::EUR);
        let b = Money::new(500, Currency::EUR);
        assert_eq!(a.try_add(&b).unwrap().amount_cents, 1500);
        assert_eq!(a.try_subtract(&b).unwrap().amount_cents, 500);
    }

    #[test]
    fn test_money_currency_mismatch() {
        let eur = Money::new(1000, Currency::EUR);
        let usd = Money::new(1000, Currency::USD);
        assert!(eur.try_add(&usd).is_none());
    }

    #[test]
    fn test_money_overflow() {
        let m = Money::new(i64::MAX, Currency::EUR);
        assert!(m.try_multiply(2).is_none());
        assert!(m.try_add(&Money::new(1, Currency::EUR)).is_none());
    }

    #[test]
    fn test_money_sum() {
        let values = [
            Money::new(100, Currency::EUR),
            Money::new(250, Currency::EUR),
        ];
        let total = Money::try_sum(values.iter(), Currency::EUR).unwrap();
        assert_eq!(total.amount_cents, 350);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("EUR"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("usd"), Some(Currency::USD));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
