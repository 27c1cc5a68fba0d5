//! Category filter buttons.

use bijou_commerce::catalog::{CategoryFilter, ACTIVE_CLASS, HIDDEN_CLASS, PASSIVE_CLASS};
use web_sys::{Document, Element};

use crate::config::FilterConfig;
use crate::dom;

/// Attribute naming the class a filter button selects.
pub const TARGET_ATTR: &str = "data-target";

/// Select `button` and show only what its target names.
///
/// `all` reveals every item. A category hides every item, then reveals
/// every element carrying the category class, teaser or not.
pub fn apply(document: &Document, config: &FilterConfig, button: &Element) -> CategoryFilter {
    let filter = CategoryFilter::from_target(button.get_attribute(TARGET_ATTR).as_deref());

    for other in dom::query_all(document, &config.button_selector) {
        dom::toggle_class(&other, ACTIVE_CLASS, false);
        dom::toggle_class(&other, PASSIVE_CLASS, true);
    }
    dom::toggle_class(button, PASSIVE_CLASS, false);
    dom::toggle_class(button, ACTIVE_CLASS, true);

    let items = dom::query_all(document, &config.item_selector);
    let shown = match filter.selector() {
        None => {
            for item in &items {
                dom::toggle_class(item, HIDDEN_CLASS, false);
            }
            items.len()
        }
        Some(selector) => {
            for item in &items {
                dom::toggle_class(item, HIDDEN_CLASS, true);
            }
            let matches = dom::query_all(document, &selector);
            for element in &matches {
                dom::toggle_class(element, HIDDEN_CLASS, false);
            }
            matches.len()
        }
    };
    tracing::debug!(category = filter.target(), shown, "filter applied");
    filter
}
