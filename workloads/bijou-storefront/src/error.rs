//! Storefront error type.

use bijou_commerce::CommerceError;
use wasm_bindgen::{JsCast, JsValue};

/// Errors raised by the browser glue.
#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("request failed: {0}")]
    Http(String),

    #[error("browser error: {0}")]
    Js(String),
}

impl StorefrontError {
    /// A required page element or global is absent.
    pub fn missing(what: &str) -> Self {
        StorefrontError::Js(format!("{} not found", what))
    }
}

impl From<JsValue> for StorefrontError {
    fn from(value: JsValue) -> Self {
        let message = match value.dyn_ref::<js_sys::Error>() {
            Some(error) => String::from(error.message()),
            None => value.as_string().unwrap_or_else(|| format!("{:?}", value)),
        };
        StorefrontError::Js(message)
    }
}

impl From<serde_wasm_bindgen::Error> for StorefrontError {
    fn from(error: serde_wasm_bindgen::Error) -> Self {
        StorefrontError::Js(error.to_string())
    }
}

impl From<gloo_net::Error> for StorefrontError {
    fn from(error: gloo_net::Error) -> Self {
        StorefrontError::Http(error.to_string())
    }
}

impl From<StorefrontError> for JsValue {
    fn from(error: StorefrontError) -> Self {
        js_sys::Error::new(&error.to_string()).into()
    }
}
