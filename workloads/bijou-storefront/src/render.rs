//! Cart markup and formatted totals.
//!
//! Pure: builds strings from a [`Cart`] and its [`CartTotals`]; the view
//! decides where they go.

use bijou_commerce::cart::{Cart, CartTotals, LineItem};

/// Attribute carrying a line's index on its Remove button.
pub const REMOVE_INDEX_ATTR: &str = "data-remove-index";

/// Everything the cart panel shows after a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRender {
    /// Markup for the item list.
    pub items_html: String,
    /// Item total, e.g. `"149.97"`.
    pub item_total: String,
    /// Shipping surcharge, e.g. `"4.90"`.
    pub shipping: String,
    /// Grand total, e.g. `"154.87"`.
    pub grand_total: String,
    /// Item count badge, e.g. `"(3)"`.
    pub count_label: String,
    /// False hides the payment region.
    pub has_items: bool,
}

impl CartRender {
    pub fn new(cart: &Cart, totals: &CartTotals) -> Self {
        let items_html = cart
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| line_html(index, item))
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            items_html,
            item_total: totals.item_total.display_amount(),
            shipping: totals.shipping.display_amount(),
            grand_total: totals.grand_total.display_amount(),
            count_label: format!("({})", totals.item_count),
            has_items: totals.has_items(),
        }
    }
}

fn line_html(index: usize, item: &LineItem) -> String {
    let price = item
        .line_total()
        .map(|total| total.display_trailing())
        .unwrap_or_default();
    format!(
        concat!(
            "<div class=\"cart-item\">",
            "<span><a class=\"internal\" href=\"{link}\">{quantity} \u{00d7} {name} (Size: {size})</a></span>",
            "<span class=\"price\">{price}</span>",
            "<button type=\"button\" class=\"remove\" {attr}=\"{index}\">Remove</button>",
            "</div>"
        ),
        link = escape_html(&item.link),
        quantity = item.quantity,
        name = escape_html(&item.name),
        size = escape_html(item.ring_size.as_str()),
        price = escape_html(&price),
        attr = REMOVE_INDEX_ATTR,
        index = index,
    )
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
