//! Startup and the JavaScript API.

use std::rc::Rc;

use bijou_cache::LocalStore;
use bijou_commerce::cart::{CartStore, RingSize};
use bijou_commerce::Money;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::config::{StorefrontConfig, CONFIG_ELEMENT_ID};
use crate::controller::{CartController, SharedController};
use crate::dom;
use crate::error::StorefrontError;
use crate::events;
use crate::input::leading_integer;
use crate::paypal;
use crate::view::WebCartView;
use crate::visibility;

type PageController = SharedController<LocalStore, WebCartView>;

/// The cart API product pages call, published as `window.storefront`.
#[wasm_bindgen]
#[derive(Clone)]
pub struct Storefront {
    controller: PageController,
}

#[wasm_bindgen]
impl Storefront {
    /// Add an item; `price`, `ringSize` and `quantity` may be numbers or the
    /// raw strings of form fields. `link` defaults to the current page.
    #[wasm_bindgen(js_name = addToCart)]
    pub fn add_to_cart(
        &self,
        name: String,
        price: JsValue,
        ring_size: JsValue,
        quantity: JsValue,
        link: Option<String>,
    ) -> Result<u32, JsValue> {
        let currency = self.controller.borrow().cart().currency();
        let price = match price.as_f64() {
            Some(price) => price,
            None => Money::parse_lenient(&price.as_string().unwrap_or_default(), currency)
                .to_decimal(),
        };
        let ring_size = match ring_size.as_f64() {
            Some(size) => RingSize::from_number(size),
            None => RingSize::new(ring_size.as_string().unwrap_or_default()),
        };
        let quantity = match quantity.as_f64() {
            Some(n) if n.is_finite() => n.trunc() as i64,
            Some(_) => 0,
            None => leading_integer(&quantity.as_string().unwrap_or_default()),
        };
        let link = link
            .filter(|link| !link.is_empty())
            .or_else(dom::location_href)
            .unwrap_or_default();

        let index = self
            .controller
            .borrow_mut()
            .add(name, price, ring_size, quantity, link)?;
        Ok(index as u32)
    }

    /// Remove the line at `index`. Returns whether a line was removed.
    #[wasm_bindgen(js_name = removeFromCart)]
    pub fn remove_from_cart(&self, index: u32) -> Result<bool, JsValue> {
        let removed = self.controller.borrow_mut().remove(index as usize)?;
        Ok(removed.is_some())
    }

    #[wasm_bindgen(js_name = clearCart)]
    pub fn clear_cart(&self) -> Result<(), JsValue> {
        self.controller.borrow_mut().clear()?;
        Ok(())
    }

    /// Re-render, e.g. after the shipping field changed.
    pub fn refresh(&self) -> Result<(), JsValue> {
        self.controller.borrow().refresh()?;
        Ok(())
    }

    /// Sum of quantities.
    #[wasm_bindgen(js_name = itemCount)]
    pub fn item_count(&self) -> f64 {
        self.controller.borrow().cart().item_count() as f64
    }

    /// Grand total with two decimals, e.g. `"154.87"`.
    #[wasm_bindgen(js_name = grandTotal)]
    pub fn grand_total(&self) -> Result<String, JsValue> {
        let totals = self.controller.borrow().totals()?;
        Ok(totals.grand_total.display_amount())
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = dom::document()?;
    if document.ready_state() == "loading" {
        dom::listen(&document, "DOMContentLoaded", |_: web_sys::Event| {
            if let Err(e) = run() {
                web_sys::console::error_1(&e.to_string().into());
            }
        })?;
        return Ok(());
    }
    run()?;
    Ok(())
}

fn run() -> Result<(), StorefrontError> {
    let document = dom::document()?;
    let (config, config_error) = match read_config(&document) {
        Ok(config) => (config, None),
        Err(e) => (StorefrontConfig::default(), Some(e)),
    };
    if let Err(e) = bijou_observability::init(&config.log) {
        web_sys::console::warn_1(&e.to_string().into());
    }
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "using default storefront config");
    }
    boot(&document, config)
}

fn read_config(document: &Document) -> Result<StorefrontConfig, StorefrontError> {
    let Some(block) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return Ok(StorefrontConfig::default());
    };
    let text = block.text_content().unwrap_or_default();
    StorefrontConfig::from_json(&text).map_err(|e| StorefrontError::Config(format!("{:#}", e)))
}

fn boot(document: &Document, config: StorefrontConfig) -> Result<(), StorefrontError> {
    let config = Rc::new(config);

    let store = CartStore::new(
        LocalStore::open(),
        config.cart.storage_key.clone(),
        config.cart.currency,
    );
    let mut controller = CartController::new(store, WebCartView::new(config.elements.clone()));
    let restored = controller.restore()?;
    let controller = controller.into_shared();

    if let Err(e) = visibility::start(&config.visibility, document) {
        tracing::warn!(error = %e, "visibility observer not started");
    }
    if let Err(e) = paypal::mount_buttons(Rc::clone(&controller), &config) {
        tracing::warn!(error = %e, "payment buttons not mounted");
    }
    events::bind(Rc::clone(&controller), Rc::clone(&config))?;

    let handle = Storefront { controller };
    js_sys::Reflect::set(
        &dom::window()?,
        &JsValue::from_str("storefront"),
        &JsValue::from(handle),
    )?;

    tracing::info!(lines = restored, key = %config.cart.storage_key, "storefront ready");
    Ok(())
}
