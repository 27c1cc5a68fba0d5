//! The snapshot-and-shrink effect itself.

use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use js_sys::{Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, DomParser, Element, HtmlCanvasElement, HtmlElement, SupportedType};

use crate::config::TransitionConfig;
use crate::dom;
use crate::error::StorefrontError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = html2canvas)]
    fn html2canvas(element: &Element, options: &Object) -> Result<Promise, JsValue>;
}

/// Animate from the current page to `href`, clicked at `(x, y)`.
///
/// On error the page may be half-swapped; the caller falls back to a full
/// navigation.
pub async fn play(
    config: &TransitionConfig,
    href: &str,
    x: i32,
    y: i32,
) -> Result<(), StorefrontError> {
    if !dom::global_defined("html2canvas") {
        return Err(StorefrontError::missing("html2canvas"));
    }
    let document = dom::document()?;
    let root = document
        .document_element()
        .ok_or_else(|| StorefrontError::missing("document element"))?;

    let snapshot = snapshot(&root, config.snapshot_scale).await?;
    let overlay = mount_overlay(&document, config, &snapshot, x, y)?;
    push_history(href)?;

    let swapped = swap_content(&document, href, &config.content_selector).await;
    if swapped.is_ok() {
        shrink(&overlay, config.duration_ms).await?;
    }
    overlay.remove();
    swapped
}

async fn snapshot(root: &Element, scale: f64) -> Result<String, StorefrontError> {
    let options = Object::new();
    Reflect::set(&options, &"scale".into(), &JsValue::from_f64(scale))?;
    Reflect::set(&options, &"useCORS".into(), &JsValue::TRUE)?;

    let canvas = JsFuture::from(html2canvas(root, &options)?).await?;
    let canvas: HtmlCanvasElement = canvas
        .dyn_into()
        .map_err(|_| StorefrontError::Js("html2canvas did not return a canvas".to_string()))?;
    Ok(canvas.to_data_url()?)
}

fn mount_overlay(
    document: &Document,
    config: &TransitionConfig,
    data_url: &str,
    x: i32,
    y: i32,
) -> Result<HtmlElement, StorefrontError> {
    let overlay: HtmlElement = document
        .create_element("div")?
        .dyn_into()
        .map_err(|_| StorefrontError::Js("overlay is not an HTML element".to_string()))?;
    overlay.set_class_name(&config.overlay_class);

    let style = overlay.style();
    style.set_property("background-image", &format!("url(\"{}\")", data_url))?;
    style.set_property("transform-origin", &format!("{}px {}px", x, y))?;
    style.set_property(
        "transition",
        &format!("transform {}ms ease-in", config.duration_ms),
    )?;

    document
        .body()
        .ok_or_else(|| StorefrontError::missing("body"))?
        .append_child(&overlay)?;
    Ok(overlay)
}

fn push_history(href: &str) -> Result<(), StorefrontError> {
    let state = Object::new();
    Reflect::set(&state, &"url".into(), &JsValue::from_str(href))?;
    dom::window()?
        .history()?
        .push_state_with_url(&state, "", Some(href))?;
    Ok(())
}

/// Replace the children of `selector` with those of the same element on the
/// page at `href`.
async fn swap_content(
    document: &Document,
    href: &str,
    selector: &str,
) -> Result<(), StorefrontError> {
    let response = Request::get(href).send().await?;
    if !response.ok() {
        return Err(StorefrontError::Http(format!(
            "{} {} for {}",
            response.status(),
            response.status_text(),
            href
        )));
    }
    let html = response.text().await?;

    let fetched = DomParser::new()?.parse_from_string(&html, SupportedType::TextHtml)?;
    let source = fetched
        .query_selector(selector)?
        .ok_or_else(|| StorefrontError::missing(selector))?;
    let target = document
        .query_selector(selector)?
        .ok_or_else(|| StorefrontError::missing(selector))?;
    target.set_inner_html(&source.inner_html());

    let title = fetched.title();
    if !title.is_empty() {
        document.set_title(&title);
    }
    tracing::debug!(href, "content swapped");
    Ok(())
}

async fn shrink(overlay: &HtmlElement, duration_ms: u32) -> Result<(), StorefrontError> {
    // Force a layout so the transform below animates from the mounted state.
    let _ = overlay.offset_width();
    overlay.style().set_property("transform", "scale(0)")?;
    TimeoutFuture::new(duration_ms).await;
    Ok(())
}

/// Reload on back/forward so entries pushed by transitions show their page.
pub fn reload_on_history_navigation() -> Result<(), StorefrontError> {
    let window = dom::window()?;
    dom::listen(&window, "popstate", |_: web_sys::Event| {
        let reloaded = dom::window().and_then(|w| w.location().reload().map_err(Into::into));
        if let Err(e) = reloaded {
            tracing::error!(error = %e, "reload after history navigation failed");
        }
    })
}
