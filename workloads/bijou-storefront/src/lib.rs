//! Bijou storefront - browser workload.
//!
//! Compiled to WebAssembly and loaded by every shop page. It restores the
//! cart from `localStorage`, renders it, mounts the PayPal buttons, runs the
//! page transitions and the category filter, and publishes a `Storefront`
//! object as `window.storefront` for product pages.
//!
//! Decisions live in `bijou-commerce`; this crate only talks to the page.
//! The pieces that do not need a browser (configuration, markup, the cart
//! controller and the checkout hand-off) are plain Rust and tested natively.

pub mod checkout;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod events;
pub mod filter;
pub mod input;
pub mod notify;
pub mod paypal;
pub mod render;
pub mod transition;
pub mod view;
pub mod visibility;

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
pub use app::Storefront;
pub use config::StorefrontConfig;
pub use controller::{CartController, SharedController};
pub use error::StorefrontError;
pub use render::CartRender;
pub use view::{CartView, WebCartView};
