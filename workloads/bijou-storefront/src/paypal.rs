//! PayPal Smart Buttons.
//!
//! The SDK is loaded by its own script tag and exposes `window.paypal`.
//! `createOrder` answers with the cart's order body; `onApprove` captures
//! the order and hands over to [`complete_checkout`].

use std::rc::Rc;

use async_trait::async_trait;
use bijou_cache::KeyValueStore;
use bijou_commerce::checkout::{CaptureDetails, PaymentGateway};
use bijou_commerce::CommerceError;
use js_sys::{Function, Object, Promise, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local, JsFuture};

use crate::checkout::complete_checkout;
use crate::config::StorefrontConfig;
use crate::controller::SharedController;
use crate::dom;
use crate::error::StorefrontError;
use crate::notify::HttpNotifier;
use crate::view::CartView;

#[wasm_bindgen]
extern "C" {
    type Buttons;

    #[wasm_bindgen(catch, js_namespace = paypal, js_name = Buttons)]
    fn paypal_buttons(options: &Object) -> Result<Buttons, JsValue>;

    #[wasm_bindgen(catch, method)]
    fn render(this: &Buttons, container: &str) -> Result<Promise, JsValue>;
}

/// Captures through the `actions` object the SDK passes to `onApprove`.
pub struct PayPalCapture {
    actions: JsValue,
}

impl PayPalCapture {
    pub fn new(actions: JsValue) -> Self {
        Self { actions }
    }
}

#[async_trait(?Send)]
impl PaymentGateway for PayPalCapture {
    async fn capture(&self) -> Result<CaptureDetails, CommerceError> {
        let failed = |e: JsValue| CommerceError::PaymentCapture(StorefrontError::from(e).to_string());

        let promise = order_action(&self.actions, "capture", None).map_err(failed)?;
        let details = JsFuture::from(promise).await.map_err(failed)?;
        let raw = serde_wasm_bindgen::from_value::<serde_json::Value>(details)
            .unwrap_or(serde_json::Value::Null);
        Ok(CaptureDetails::from_json(raw))
    }
}

/// Call `actions.order.<name>(arg)`, normalizing the result to a promise.
fn order_action(actions: &JsValue, name: &str, arg: Option<&JsValue>) -> Result<Promise, JsValue> {
    let order = Reflect::get(actions, &JsValue::from_str("order"))?;
    let method: Function = Reflect::get(&order, &JsValue::from_str(name))?.dyn_into()?;
    let result = match arg {
        Some(arg) => method.call1(&order, arg)?,
        None => method.call0(&order)?,
    };
    Ok(Promise::resolve(&result))
}

/// Render the buttons into the payment container.
///
/// A page without the SDK gets no buttons; that is logged, not an error.
pub fn mount_buttons<S, V>(
    controller: SharedController<S, V>,
    config: &StorefrontConfig,
) -> Result<(), StorefrontError>
where
    S: KeyValueStore + 'static,
    V: CartView + 'static,
{
    if !dom::global_defined("paypal") {
        tracing::info!("payment SDK not loaded, no buttons rendered");
        return Ok(());
    }

    let create_cart = Rc::clone(&controller);
    let create_order = Closure::wrap(Box::new(move |_data: JsValue, actions: JsValue| {
        let order = create_cart.borrow().order_request()?;
        let body = order.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?;
        tracing::debug!(lines = create_cart.borrow().cart().len(), "creating order");
        order_action(&actions, "create", Some(&body))
    }) as Box<dyn FnMut(JsValue, JsValue) -> Result<Promise, JsValue>>);

    let notify_url = config.checkout.notify_url.clone();
    let policy = config.checkout.clear_policy;
    let on_approve = Closure::wrap(Box::new(move |_data: JsValue, actions: JsValue| {
        let controller = Rc::clone(&controller);
        let notifier = HttpNotifier::new(notify_url.clone());
        future_to_promise(async move {
            complete_checkout(&controller, PayPalCapture::new(actions), notifier, policy)
                .await
                .map(|_| JsValue::UNDEFINED)
                .map_err(JsValue::from)
        })
    }) as Box<dyn FnMut(JsValue, JsValue) -> Promise>);

    let on_error = Closure::wrap(Box::new(move |error: JsValue| {
        tracing::error!(error = %StorefrontError::from(error), "payment SDK error");
    }) as Box<dyn FnMut(JsValue)>);

    let options = Object::new();
    Reflect::set(&options, &"createOrder".into(), create_order.as_ref())?;
    Reflect::set(&options, &"onApprove".into(), on_approve.as_ref())?;
    Reflect::set(&options, &"onError".into(), on_error.as_ref())?;
    create_order.forget();
    on_approve.forget();
    on_error.forget();

    let selector = config.payment_selector();
    let rendered = paypal_buttons(&options)?.render(&selector)?;
    spawn_local(async move {
        if let Err(e) = JsFuture::from(rendered).await {
            tracing::error!(error = %StorefrontError::from(e), selector, "payment buttons not rendered");
        }
    });
    Ok(())
}
