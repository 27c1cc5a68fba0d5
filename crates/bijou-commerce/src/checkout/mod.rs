//! Checkout module.
//!
//! Maps the cart into the payment provider's order schema and runs the
//! post-approval flow.

mod flow;
mod order;

pub use flow::{
    ApprovalFlow, CaptureDetails, CheckoutOutcome, ClearPolicy, NotificationStatus,
    OrderNotification, OrderNotifier, PaymentGateway,
};
pub use order::{
    AmountBreakdown, AmountValue, OrderAmount, OrderItem, OrderRequest, PurchaseUnit,
    MAX_ITEM_NAME_CHARS,
};
