//! Storefront configuration.
//!
//! Read from an optional `<script type="application/json"
//! id="storefront-config">` block. Every field has a default matching the
//! shop's markup, so a page without the block works unchanged.

use anyhow::{Context, Result};
use bijou_commerce::checkout::ClearPolicy;
use bijou_commerce::{cart::DEFAULT_CART_KEY, Currency};
use bijou_observability::LogConfig;
use serde::{Deserialize, Serialize};

/// ID of the script element holding the configuration JSON.
pub const CONFIG_ELEMENT_ID: &str = "storefront-config";

/// Storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Cart persistence.
    #[serde(default)]
    pub cart: CartConfig,

    /// Payment and order mail.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Element IDs the cart renders into.
    #[serde(default)]
    pub elements: ElementIds,

    /// Page transition.
    #[serde(default)]
    pub transition: TransitionConfig,

    /// Category filter.
    #[serde(default)]
    pub filter: FilterConfig,

    /// Options handed to `InView.init`.
    #[serde(default)]
    pub visibility: VisibilityOptions,

    /// Logging.
    #[serde(default)]
    pub log: LogConfig,
}

impl StorefrontConfig {
    /// Parse the configuration block. Blank text gives the defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(text).with_context(|| {
            format!(
                "Failed to parse storefront config in #{}",
                CONFIG_ELEMENT_ID
            )
        })
    }

    /// CSS selector of the payment button container.
    pub fn payment_selector(&self) -> String {
        format!("#{}", self.elements.payment_container)
    }
}

/// Cart persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Storage key of the serialized cart.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Currency of every price on the page.
    #[serde(default)]
    pub currency: Currency,
}

fn default_storage_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            currency: Currency::default(),
        }
    }
}

/// Checkout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Endpoint receiving `{"cart": [...]}` after a captured payment. Empty
    /// disables the notification.
    #[serde(default = "default_notify_url")]
    pub notify_url: String,

    /// Whether a failed notification still clears the cart.
    #[serde(default)]
    pub clear_policy: ClearPolicy,
}

fn default_notify_url() -> String {
    "https://tu-tienda-joyas.com/send-order-mail.php".to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            notify_url: default_notify_url(),
            clear_policy: ClearPolicy::default(),
        }
    }
}

/// IDs of the elements the cart renders into. A missing element is skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementIds {
    #[serde(default = "default_cart_items")]
    pub cart_items: String,
    #[serde(default = "default_cart_total")]
    pub cart_total: String,
    #[serde(default = "default_cart_shipping")]
    pub cart_shipping: String,
    #[serde(default = "default_final_total")]
    pub final_total: String,
    #[serde(default = "default_cart_count")]
    pub cart_count: String,
    /// The shipping surcharge input.
    #[serde(default = "default_shipping_input")]
    pub shipping_input: String,
    /// Where the payment buttons are rendered; hidden while the cart is empty.
    #[serde(default = "default_payment_container")]
    pub payment_container: String,
    #[serde(default = "default_success_message")]
    pub success_message: String,
}

fn default_cart_items() -> String {
    "cart-items".to_string()
}

fn default_cart_total() -> String {
    "cart-total".to_string()
}

fn default_cart_shipping() -> String {
    "cart-shipping".to_string()
}

fn default_final_total() -> String {
    "final-total".to_string()
}

fn default_cart_count() -> String {
    "cart-count".to_string()
}

fn default_shipping_input() -> String {
    "shipping".to_string()
}

fn default_payment_container() -> String {
    "paypal-button-container".to_string()
}

fn default_success_message() -> String {
    "success-message".to_string()
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            cart_items: default_cart_items(),
            cart_total: default_cart_total(),
            cart_shipping: default_cart_shipping(),
            final_total: default_final_total(),
            cart_count: default_cart_count(),
            shipping_input: default_shipping_input(),
            payment_container: default_payment_container(),
            success_message: default_success_message(),
        }
    }
}

/// Page transition settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// Links that animate instead of navigating.
    #[serde(default = "default_link_selector")]
    pub link_selector: String,

    /// Element whose children are swapped for the target page's.
    #[serde(default = "default_content_selector")]
    pub content_selector: String,

    /// Class of the snapshot overlay.
    #[serde(default = "default_overlay_class")]
    pub overlay_class: String,

    /// Rasterization scale of the snapshot.
    #[serde(default = "default_snapshot_scale")]
    pub snapshot_scale: f64,

    /// Shrink animation length.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u32,
}

fn default_link_selector() -> String {
    r#".internal, .productteaser, a[href*="shop"]"#.to_string()
}

fn default_content_selector() -> String {
    "#content".to_string()
}

fn default_overlay_class() -> String {
    "screenshot".to_string()
}

fn default_snapshot_scale() -> f64 {
    0.75
}

fn default_duration_ms() -> u32 {
    750
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            link_selector: default_link_selector(),
            content_selector: default_content_selector(),
            overlay_class: default_overlay_class(),
            snapshot_scale: default_snapshot_scale(),
            duration_ms: default_duration_ms(),
        }
    }
}

/// Category filter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Filter buttons; each carries a `data-target`.
    #[serde(default = "default_button_selector")]
    pub button_selector: String,

    /// Elements shown or hidden by the filter.
    #[serde(default = "default_item_selector")]
    pub item_selector: String,
}

fn default_button_selector() -> String {
    ".filter span".to_string()
}

fn default_item_selector() -> String {
    ".productteaser".to_string()
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            button_selector: default_button_selector(),
            item_selector: default_item_selector(),
        }
    }
}

/// `InView.init` options, passed through as written (camelCase).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityOptions {
    #[serde(default = "default_root_selector")]
    pub root_selector: String,
    #[serde(default = "default_root_margin")]
    pub root_margin: String,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default = "default_steps")]
    pub steps: u32,
    #[serde(default = "default_class_name")]
    pub class_name: String,
    #[serde(default)]
    pub observe_plain_imgs_too: bool,
}

fn default_root_selector() -> String {
    "body".to_string()
}

fn default_root_margin() -> String {
    "200px 0px".to_string()
}

fn default_steps() -> u32 {
    10
}

fn default_class_name() -> String {
    "in-view".to_string()
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            root_selector: default_root_selector(),
            root_margin: default_root_margin(),
            threshold: 0.0,
            steps: default_steps(),
            class_name: default_class_name(),
            observe_plain_imgs_too: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bijou_observability::{LogFormat, LogLevel};

    #[test]
    fn test_defaults_match_markup() {
        let config = StorefrontConfig::default();

        assert_eq!(config.cart.storage_key, "cart");
        assert_eq!(config.cart.currency, Currency::EUR);
        assert_eq!(config.elements.cart_items, "cart-items");
        assert_eq!(config.elements.shipping_input, "shipping");
        assert_eq!(config.payment_selector(), "#paypal-button-container");
        assert_eq!(config.transition.content_selector, "#content");
        assert_eq!(config.transition.duration_ms, 750);
        assert_eq!(config.filter.button_selector, ".filter span");
        assert_eq!(config.checkout.clear_policy, ClearPolicy::Always);
    }

    #[test]
    fn test_blank_block_gives_defaults() {
        assert_eq!(
            StorefrontConfig::from_json("  \n").unwrap(),
            StorefrontConfig::default()
        );
        assert_eq!(
            StorefrontConfig::from_json("{}").unwrap(),
            StorefrontConfig::default()
        );
    }

    #[test]
    fn test_partial_override() {
        let config = StorefrontConfig::from_json(
            r#"{
                "cart": {"storage_key": "bijou-cart"},
                "checkout": {"notify_url": "", "clear_policy": "on_delivered"},
                "elements": {"cart_count": "badge"},
                "log": {"level": "debug", "format": "human"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.cart.storage_key, "bijou-cart");
        assert_eq!(config.cart.currency, Currency::EUR);
        assert!(config.checkout.notify_url.is_empty());
        assert_eq!(config.checkout.clear_policy, ClearPolicy::OnDelivered);
        assert_eq!(config.elements.cart_count, "badge");
        assert_eq!(config.elements.cart_total, "cart-total");
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.log.format, LogFormat::Human);
    }

    #[test]
    fn test_visibility_options_are_camel_case() {
        let json = serde_json::to_value(VisibilityOptions::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "rootSelector": "body",
                "rootMargin": "200px 0px",
                "threshold": 0.0,
                "steps": 10,
                "className": "in-view",
                "observePlainImgsToo": false
            })
        );
    }

    #[test]
    fn test_malformed_block() {
        let err = StorefrontConfig::from_json("{\"cart\": ").unwrap_err();
        assert!(err.to_string().contains(CONFIG_ELEMENT_ID));
    }
}
