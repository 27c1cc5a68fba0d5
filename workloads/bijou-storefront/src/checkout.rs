//! Post-approval handling for the page.

use bijou_cache::KeyValueStore;
use bijou_commerce::checkout::{
    ApprovalFlow, CheckoutOutcome, ClearPolicy, OrderNotifier, PaymentGateway,
};

use crate::controller::SharedController;
use crate::error::StorefrontError;
use crate::view::CartView;

/// Capture the approved order, show the success banner, send the order
/// mail and clear the cart as `policy` says.
///
/// The banner goes up as soon as the capture succeeds, before the mail
/// request is answered. The flow runs on a snapshot of the cart, so no
/// borrow of the controller is held while the provider or the mail
/// endpoint is awaited.
pub async fn complete_checkout<S, V, G, N>(
    controller: &SharedController<S, V>,
    gateway: G,
    notifier: N,
    policy: ClearPolicy,
) -> Result<CheckoutOutcome, StorefrontError>
where
    S: KeyValueStore,
    V: CartView,
    G: PaymentGateway,
    N: OrderNotifier,
{
    let snapshot = controller.borrow().cart().clone();
    let flow = ApprovalFlow::new(gateway, notifier).with_policy(policy);
    let capture = flow.capture(&snapshot).await?;
    controller.borrow().show_success();

    let outcome = flow.notify(&snapshot, capture).await;
    if outcome.clear_cart {
        controller.borrow_mut().clear()?;
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::tests::{controller, RecordingView};
    use async_trait::async_trait;
    use bijou_cache::MemoryStore;
    use bijou_commerce::checkout::{CaptureDetails, NotificationStatus, OrderNotification};
    use bijou_commerce::CommerceError;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Gateway {
        fail: bool,
    }

    #[async_trait(?Send)]
    impl PaymentGateway for Gateway {
        async fn capture(&self) -> Result<CaptureDetails, CommerceError> {
            if self.fail {
                Err(CommerceError::PaymentCapture("ORDER_NOT_APPROVED".into()))
            } else {
                Ok(CaptureDetails::from_json(
                    serde_json::json!({"id": "8F2", "status": "COMPLETED"}),
                ))
            }
        }
    }

    struct Notifier {
        status: NotificationStatus,
    }

    #[async_trait(?Send)]
    impl OrderNotifier for Notifier {
        async fn notify(&self, _notification: &OrderNotification) -> NotificationStatus {
            self.status.clone()
        }
    }

    fn delivered() -> Notifier {
        Notifier {
            status: NotificationStatus::Delivered { status: 200 },
        }
    }

    fn failed() -> Notifier {
        Notifier {
            status: NotificationStatus::Failed {
                reason: "network".into(),
            },
        }
    }

    #[test]
    fn test_completed_checkout_clears_cart() {
        let backend = MemoryStore::new();
        let shared = controller(&backend).into_shared();
        shared.borrow_mut().add("Ring A", 49.99, "7", 1, "").unwrap();

        let outcome = block_on(complete_checkout(
            &shared,
            Gateway { fail: false },
            delivered(),
            ClearPolicy::Always,
        ))
        .unwrap();

        assert_eq!(outcome.capture.id.as_deref(), Some("8F2"));
        let cart = shared.borrow();
        assert!(cart.cart().is_empty());
        assert!(backend.is_empty());
        assert_eq!(cart.view().success.get(), Some(true));
        assert!(!cart.view().last().has_items);
    }

    /// Records whether the success banner was up when the mail was sent.
    struct BannerWitness {
        shared: SharedController<MemoryStore, RecordingView>,
        seen: Rc<Cell<Option<bool>>>,
    }

    #[async_trait(?Send)]
    impl OrderNotifier for BannerWitness {
        async fn notify(&self, _notification: &OrderNotification) -> NotificationStatus {
            self.seen.set(self.shared.borrow().view().success.get());
            NotificationStatus::Delivered { status: 200 }
        }
    }

    #[test]
    fn test_banner_shown_before_mail() {
        let shared = controller(&MemoryStore::new()).into_shared();
        shared.borrow_mut().add("Ring A", 49.99, "7", 1, "").unwrap();
        let seen = Rc::new(Cell::new(None));
        let witness = BannerWitness {
            shared: shared.clone(),
            seen: seen.clone(),
        };

        block_on(complete_checkout(
            &shared,
            Gateway { fail: false },
            witness,
            ClearPolicy::Always,
        ))
        .unwrap();

        assert_eq!(seen.get(), Some(true));
    }

    #[test]
    fn test_failed_mail_keeps_cart_when_configured() {
        let shared = controller(&MemoryStore::new()).into_shared();
        shared.borrow_mut().add("Ring A", 49.99, "7", 1, "").unwrap();

        let outcome = block_on(complete_checkout(
            &shared,
            Gateway { fail: false },
            failed(),
            ClearPolicy::OnDelivered,
        ))
        .unwrap();

        assert!(!outcome.clear_cart);
        assert_eq!(shared.borrow().cart().len(), 1);
    }

    #[test]
    fn test_capture_failure_keeps_cart() {
        let shared = controller(&MemoryStore::new()).into_shared();
        shared.borrow_mut().add("Ring A", 49.99, "7", 1, "").unwrap();

        let result = block_on(complete_checkout(
            &shared,
            Gateway { fail: true },
            delivered(),
            ClearPolicy::Always,
        ));

        assert!(matches!(
            result,
            Err(StorefrontError::Commerce(CommerceError::PaymentCapture(_)))
        ));
        let cart = shared.borrow();
        assert_eq!(cart.cart().len(), 1);
        assert_ne!(cart.view().success.get(), Some(true));
    }
}
