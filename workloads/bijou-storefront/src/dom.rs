//! DOM helpers.
//!
//! Lookups return `Option`/`Result` instead of panicking: the storefront
//! script is included on pages that lack parts of the shop markup.

use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, Window};

use crate::error::StorefrontError;

pub fn window() -> Result<Window, StorefrontError> {
    web_sys::window().ok_or_else(|| StorefrontError::missing("window"))
}

pub fn document() -> Result<Document, StorefrontError> {
    window()?
        .document()
        .ok_or_else(|| StorefrontError::missing("document"))
}

pub fn by_id(id: &str) -> Option<Element> {
    document().ok()?.get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        tracing::warn!(selector, "invalid selector");
        return Vec::new();
    };
    let mut v = Vec::new();
    for i in 0..nodes.length() {
        if let Some(node) = nodes.item(i) {
            if let Ok(el) = node.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

/// Add or remove `class` depending on `on`.
pub fn toggle_class(el: &Element, class: &str, on: bool) {
    let list = el.class_list();
    let result = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
    if result.is_err() {
        tracing::debug!(class, "class list update failed");
    }
}

/// Whether `name` is defined on the global object, e.g. an SDK loaded by a
/// separate script tag.
pub fn global_defined(name: &str) -> bool {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .map(|value| !value.is_undefined() && !value.is_null())
        .unwrap_or(false)
}

pub fn location_href() -> Option<String> {
    window().ok()?.location().href().ok()
}

pub fn location_origin() -> Option<String> {
    window().ok()?.location().origin().ok()
}

/// Full page load of `href`.
pub fn navigate(href: &str) {
    let result = window().and_then(|w| w.location().set_href(href).map_err(Into::into));
    if let Err(e) = result {
        tracing::error!(error = %e, href, "navigation failed");
    }
}

/// Attach `handler` for `event` on `target` for the page's lifetime.
pub fn listen<E, F>(target: &EventTarget, event: &str, handler: F) -> Result<(), StorefrontError>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}
