//! What happens after the buyer approves a payment.
//!
//! Capture the order, tell the shop's mail endpoint what was bought, then
//! decide whether the cart is cleared.

use crate::cart::{Cart, StoredLineItem};
use crate::error::CommerceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of capturing an approved order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaptureDetails {
    /// Provider order ID.
    pub id: Option<String>,
    /// Provider status, e.g. `"COMPLETED"`.
    pub status: Option<String>,
    /// Full provider response.
    pub raw: serde_json::Value,
}

impl CaptureDetails {
    /// Pick the interesting fields out of a provider response.
    pub fn from_json(raw: serde_json::Value) -> Self {
        let field = |name: &str| raw.get(name).and_then(|v| v.as_str()).map(str::to_string);
        Self {
            id: field("id"),
            status: field("status"),
            raw,
        }
    }
}

/// Captures an approved order.
#[async_trait(?Send)]
pub trait PaymentGateway {
    async fn capture(&self) -> Result<CaptureDetails, CommerceError>;
}

/// Body of the order-mail request: `{"cart": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderNotification {
    pub cart: Vec<StoredLineItem>,
}

impl OrderNotification {
    /// Snapshot of `cart`.
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            cart: cart.to_stored(),
        }
    }
}

/// What came of the order-mail request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    /// The endpoint answered with a success status.
    Delivered { status: u16 },
    /// Network failure or an error status.
    Failed { reason: String },
}

impl NotificationStatus {
    /// Check if the endpoint accepted the notification.
    pub fn is_delivered(&self) -> bool {
        matches!(self, NotificationStatus::Delivered { .. })
    }
}

/// Sends the order-mail request.
#[async_trait(?Send)]
pub trait OrderNotifier {
    async fn notify(&self, notification: &OrderNotification) -> NotificationStatus;
}

/// When a captured order empties the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearPolicy {
    /// Clear after capture whatever the notification did.
    #[default]
    Always,
    /// Keep the cart when the notification failed.
    OnDelivered,
}

impl ClearPolicy {
    pub fn should_clear(&self, notification: &NotificationStatus) -> bool {
        match self {
            ClearPolicy::Always => true,
            ClearPolicy::OnDelivered => notification.is_delivered(),
        }
    }
}

/// Outcome of a completed approval.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutOutcome {
    pub capture: CaptureDetails,
    pub notification: NotificationStatus,
    /// Whether the caller should now clear the cart.
    pub clear_cart: bool,
}

/// Capture, notify, decide.
///
/// Works on a cart snapshot so the caller holds no borrow of its cart
/// across the awaits.
pub struct ApprovalFlow<G, N> {
    gateway: G,
    notifier: N,
    policy: ClearPolicy,
}

impl<G: PaymentGateway, N: OrderNotifier> ApprovalFlow<G, N> {
    pub fn new(gateway: G, notifier: N) -> Self {
        Self {
            gateway,
            notifier,
            policy: ClearPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ClearPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Run the approval for `cart`: [`capture`](Self::capture), then
    /// [`notify`](Self::notify).
    ///
    /// A capture failure is returned as an error before anything is sent;
    /// the cart must then be kept.
    pub async fn run(&self, cart: &Cart) -> Result<CheckoutOutcome, CommerceError> {
        let capture = self.capture(cart).await?;
        Ok(self.notify(cart, capture).await)
    }

    /// Capture the approved order.
    pub async fn capture(&self, cart: &Cart) -> Result<CaptureDetails, CommerceError> {
        let capture = match self.gateway.capture().await {
            Ok(capture) => capture,
            Err(e) => {
                tracing::error!(error = %e, "order capture failed");
                return Err(e);
            }
        };
        tracing::info!(
            order_id = capture.id.as_deref().unwrap_or("-"),
            status = capture.status.as_deref().unwrap_or("-"),
            lines = cart.len(),
            "order captured"
        );
        Ok(capture)
    }

    /// Send the order mail for a captured order and decide whether the
    /// cart is cleared. Never fails; a failed send is in the outcome.
    pub async fn notify(&self, cart: &Cart, capture: CaptureDetails) -> CheckoutOutcome {
        let notification = self
            .notifier
            .notify(&OrderNotification::from_cart(cart))
            .await;
        match &notification {
            NotificationStatus::Delivered { status } => {
                tracing::info!(status, "order mail sent");
            }
            NotificationStatus::Failed { reason } => {
                tracing::warn!(reason = %reason, policy = ?self.policy, "order mail failed");
            }
        }

        let clear_cart = self.policy.should_clear(&notification);
        CheckoutOutcome {
            capture,
            notification,
            clear_cart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::RingSize;
    use crate::money::{Currency, Money};
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FakeGateway {
        fail: bool,
    }

    #[async_trait(?Send)]
    impl PaymentGateway for FakeGateway {
        async fn capture(&self) -> Result<CaptureDetails, CommerceError> {
            if self.fail {
                Err(CommerceError::PaymentCapture("INSTRUMENT_DECLINED".into()))
            } else {
                Ok(CaptureDetails::from_json(serde_json::json!({
                    "id": "5O190127TN364715T",
                    "status": "COMPLETED"
                })))
            }
        }
    }

    #[derive(Clone, Default)]
    struct FakeNotifier {
        fail: bool,
        sent: Rc<RefCell<Vec<OrderNotification>>>,
    }

    #[async_trait(?Send)]
    impl OrderNotifier for FakeNotifier {
        async fn notify(&self, notification: &OrderNotification) -> NotificationStatus {
            self.sent.borrow_mut().push(notification.clone());
            if self.fail {
                NotificationStatus::Failed {
                    reason: "502 Bad Gateway".into(),
                }
            } else {
                NotificationStatus::Delivered { status: 200 }
            }
        }
    }

    fn cart() -> Cart {
        let mut cart = Cart::new(Currency::EUR);
        cart.add_item(
            "Ring A",
            Money::new(4999, Currency::EUR),
            RingSize::new("7"),
            3,
            "/a",
        )
        .unwrap();
        cart
    }

    #[test]
    fn test_approval_delivered() {
        let notifier = FakeNotifier::default();
        let flow = ApprovalFlow::new(FakeGateway { fail: false }, notifier.clone());

        let outcome = block_on(flow.run(&cart())).unwrap();
        assert_eq!(outcome.capture.status.as_deref(), Some("COMPLETED"));
        assert!(outcome.notification.is_delivered());
        assert!(outcome.clear_cart);

        let sent = notifier.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].cart[0].quantity, 3);
    }

    #[test]
    fn test_failed_notification_still_clears_by_default() {
        let notifier = FakeNotifier {
            fail: true,
            ..Default::default()
        };
        let flow = ApprovalFlow::new(FakeGateway { fail: false }, notifier.clone());

        let outcome = block_on(flow.run(&cart())).unwrap();
        assert!(!outcome.notification.is_delivered());
        assert!(outcome.clear_cart);
    }

    #[test]
    fn test_failed_notification_keeps_cart_on_delivered_policy() {
        let notifier = FakeNotifier {
            fail: true,
            ..Default::default()
        };
        let flow = ApprovalFlow::new(FakeGateway { fail: false }, notifier.clone())
            .with_policy(ClearPolicy::OnDelivered);

        let outcome = block_on(flow.run(&cart())).unwrap();
        assert!(!outcome.clear_cart);
    }

    #[test]
    fn test_capture_failure_sends_nothing() {
        let notifier = FakeNotifier::default();
        let flow = ApprovalFlow::new(FakeGateway { fail: true }, notifier.clone());

        let result = block_on(flow.run(&cart()));
        assert!(matches!(result, Err(CommerceError::PaymentCapture(_))));
        assert!(notifier.sent.borrow().is_empty());
    }

    #[test]
    fn test_steps_run_separately() {
        let notifier = FakeNotifier::default();
        let flow = ApprovalFlow::new(FakeGateway { fail: false }, notifier.clone());
        let cart = cart();

        let capture = block_on(flow.capture(&cart)).unwrap();
        assert_eq!(capture.id.as_deref(), Some("5O190127TN364715T"));
        assert!(notifier.sent.borrow().is_empty());

        let outcome = block_on(flow.notify(&cart, capture));
        assert!(outcome.notification.is_delivered());
        assert_eq!(notifier.sent.borrow().len(), 1);
    }

    #[test]
    fn test_notification_body() {
        let json = serde_json::to_value(OrderNotification::from_cart(&cart())).unwrap();
        assert_eq!(json["cart"][0]["name"], "Ring A");
        assert_eq!(json["cart"][0]["ringSize"], "7");
    }

    #[test]
    fn test_clear_policy_serde() {
        let policy: ClearPolicy = serde_json::from_str("\"on_delivered\"").unwrap();
        assert_eq!(policy, ClearPolicy::OnDelivered);
    }
}
