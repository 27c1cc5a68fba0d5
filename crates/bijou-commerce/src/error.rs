//! Commerce error types.

use bijou_cache::CacheError;
use thiserror::Error;

/// Errors that can occur in cart and checkout operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Persistent storage failed or held an unreadable cart.
    #[error("Cart storage error: {0}")]
    Storage(#[from] CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The payment provider refused or failed to capture the order.
    #[error("Payment capture failed: {0}")]
    PaymentCapture(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
