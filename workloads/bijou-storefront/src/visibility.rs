//! Lazy reveal of elements scrolled into view, via the `InView` script.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::config::VisibilityOptions;
use crate::dom;
use crate::error::StorefrontError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = InView, js_name = init)]
    fn in_view_init(options: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = InView, js_name = observeWithin)]
    fn in_view_observe_within(root: &JsValue) -> Result<(), JsValue>;
}

/// Configure `InView` and observe the whole document.
pub fn start(options: &VisibilityOptions, document: &Document) -> Result<(), StorefrontError> {
    if !dom::global_defined("InView") {
        tracing::info!("InView not loaded, visibility classes disabled");
        return Ok(());
    }
    let js_options = options.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?;
    in_view_init(&js_options)?;
    observe(document)
}

/// Observe elements inside `root`, e.g. content swapped in by a transition.
pub fn observe(root: &Document) -> Result<(), StorefrontError> {
    if !dom::global_defined("InView") {
        return Ok(());
    }
    in_view_observe_within(root.as_ref())?;
    Ok(())
}
