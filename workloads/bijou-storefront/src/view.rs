//! Where the cart shows up on the page.

use bijou_commerce::catalog::HIDDEN_CLASS;
use web_sys::{HtmlElement, HtmlInputElement};

use crate::config::ElementIds;
use crate::dom;
use crate::render::CartRender;

/// The cart panel as the controller sees it.
pub trait CartView {
    /// Raw text of the shipping surcharge field, if the page has one.
    fn shipping_text(&self) -> Option<String>;

    /// Replace the panel's contents.
    fn show(&self, render: &CartRender);

    /// Show or hide the payment success banner.
    fn set_success_visible(&self, visible: bool);
}

/// [`CartView`] over the live document, looking elements up by ID on every
/// call so content swapped in by a page transition is picked up.
#[derive(Debug, Clone)]
pub struct WebCartView {
    ids: ElementIds,
}

impl WebCartView {
    pub fn new(ids: ElementIds) -> Self {
        Self { ids }
    }
}

impl CartView for WebCartView {
    fn shipping_text(&self) -> Option<String> {
        dom::by_id_typed::<HtmlInputElement>(&self.ids.shipping_input).map(|input| input.value())
    }

    fn show(&self, render: &CartRender) {
        // Pages without a cart list have nothing else to update either.
        let Some(list) = dom::by_id(&self.ids.cart_items) else {
            return;
        };
        list.set_inner_html(&render.items_html);

        let texts = [
            (&self.ids.cart_total, &render.item_total),
            (&self.ids.cart_shipping, &render.shipping),
            (&self.ids.final_total, &render.grand_total),
            (&self.ids.cart_count, &render.count_label),
        ];
        for (id, text) in texts {
            if let Some(el) = dom::by_id(id) {
                dom::set_text(&el, text);
            }
        }

        if let Some(container) = dom::by_id(&self.ids.payment_container) {
            dom::toggle_class(&container, HIDDEN_CLASS, !render.has_items);
        }
    }

    fn set_success_visible(&self, visible: bool) {
        let Some(banner) = dom::by_id_typed::<HtmlElement>(&self.ids.success_message) else {
            return;
        };
        let value = if visible { "block" } else { "none" };
        if banner.style().set_property("display", value).is_err() {
            tracing::debug!(value, "success banner style not applied");
        }
    }
}
