//! Event binding.
//!
//! One delegated click listener on the document serves Remove buttons,
//! filter buttons and transition links, so markup swapped in by a
//! transition needs no rebinding.

use std::rc::Rc;

use bijou_cache::KeyValueStore;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlAnchorElement, MouseEvent};

use crate::config::StorefrontConfig;
use crate::controller::SharedController;
use crate::dom;
use crate::error::StorefrontError;
use crate::filter;
use crate::render::REMOVE_INDEX_ATTR;
use crate::transition::{self, LinkClick, TransitionGate};
use crate::view::CartView;
use crate::visibility;

/// Bind all listeners. Call once after the cart is restored.
pub fn bind<S, V>(
    controller: SharedController<S, V>,
    config: Rc<StorefrontConfig>,
) -> Result<(), StorefrontError>
where
    S: KeyValueStore + 'static,
    V: CartView + 'static,
{
    let document = dom::document()?;
    let gate = TransitionGate::new();
    dom::listen(&document, "click", move |event: MouseEvent| {
        on_click(&event, &controller, &config, &gate);
    })?;
    transition::reload_on_history_navigation()
}

fn on_click<S, V>(
    event: &MouseEvent,
    controller: &SharedController<S, V>,
    config: &Rc<StorefrontConfig>,
    gate: &TransitionGate,
) where
    S: KeyValueStore + 'static,
    V: CartView + 'static,
{
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };

    if let Some(button) = closest(&target, &format!("[{}]", REMOVE_INDEX_ATTR)) {
        event.prevent_default();
        remove_line(controller, &button);
        return;
    }

    if let Some(button) = closest(&target, &config.filter.button_selector) {
        if let Ok(document) = dom::document() {
            filter::apply(&document, &config.filter, &button);
        }
        return;
    }

    if let Some(link) = closest(&target, &config.transition.link_selector) {
        follow_link(event, controller, config, gate, &link);
    }
}

fn closest(target: &Element, selector: &str) -> Option<Element> {
    target.closest(selector).ok().flatten()
}

fn remove_line<S: KeyValueStore, V: CartView>(
    controller: &SharedController<S, V>,
    button: &Element,
) {
    let Some(index) = button
        .get_attribute(REMOVE_INDEX_ATTR)
        .and_then(|value| value.trim().parse::<usize>().ok())
    else {
        tracing::warn!("remove button without a valid index");
        return;
    };
    if let Err(e) = controller.borrow_mut().remove(index) {
        tracing::error!(error = %e, index, "remove failed");
    }
}

fn follow_link<S, V>(
    event: &MouseEvent,
    controller: &SharedController<S, V>,
    config: &Rc<StorefrontConfig>,
    gate: &TransitionGate,
    link: &Element,
) where
    S: KeyValueStore + 'static,
    V: CartView + 'static,
{
    let href = match link.dyn_ref::<HtmlAnchorElement>() {
        Some(anchor) => anchor.href(),
        None => match link.get_attribute("href") {
            Some(href) => href,
            None => return,
        },
    };
    let click = LinkClick {
        href,
        origin: dom::location_origin().unwrap_or_default(),
        button: event.button(),
        modifier: event.ctrl_key() || event.meta_key() || event.shift_key() || event.alt_key(),
        leaves_page: link.get_attribute("target").as_deref() == Some("_blank")
            || link.has_attribute("download"),
    };
    if !click.should_intercept() {
        return;
    }

    event.prevent_default();
    let Some(guard) = gate.try_begin() else {
        tracing::debug!(href = %click.href, "transition running, click dropped");
        return;
    };

    let controller = Rc::clone(controller);
    let config = Rc::clone(config);
    let (x, y) = (event.page_x(), event.page_y());
    spawn_local(async move {
        let _guard = guard;
        match transition::play(&config.transition, &click.href, x, y).await {
            Ok(()) => {
                if let Err(e) = controller.borrow().refresh() {
                    tracing::error!(error = %e, "cart refresh after transition failed");
                }
                if let Ok(document) = dom::document() {
                    if let Err(e) = visibility::observe(&document) {
                        tracing::warn!(error = %e, "observing swapped content failed");
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, href = %click.href, "transition failed, navigating");
                dom::navigate(&click.href);
            }
        }
    });
}
