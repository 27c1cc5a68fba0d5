//! Structured logging for the Bijou storefront.
//!
//! This crate provides:
//! - `LogLevel` / `LogEntry` / `LogFormat` - structured log lines, JSON or human
//! - `StructuredLayer` - a `tracing-subscriber` layer writing those lines
//! - `init` - install the layer as the global subscriber
//!
//! Library crates only emit `tracing` events; the storefront calls [`init`]
//! once at startup.

mod layer;
mod logging;

pub use layer::*;
pub use logging::*;

use tracing_subscriber::layer::SubscriberExt;

/// Errors from setting up logging.
#[derive(Debug, thiserror::Error)]
pub enum ObservabilityError {
    #[error("a global subscriber is already installed")]
    AlreadyInitialized,
}

/// Install a [`StructuredLayer`] on the default writer as the global
/// subscriber.
pub fn init(config: &LogConfig) -> Result<(), ObservabilityError> {
    let layer = StructuredLayer::new(default_writer())
        .with_min_level(config.level)
        .with_format(config.format);
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|_| ObservabilityError::AlreadyInitialized)
}
