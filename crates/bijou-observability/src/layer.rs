//! `tracing` layer that writes [`LogEntry`] lines.

use std::collections::BTreeMap;
use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::logging::{LogEntry, LogFormat, LogLevel};

/// Destination for formatted log lines.
pub trait LogWriter: Send + Sync + 'static {
    fn write(&self, level: LogLevel, line: &str);
}

impl<W: LogWriter + ?Sized> LogWriter for Box<W> {
    fn write(&self, level: LogLevel, line: &str) {
        (**self).write(level, line)
    }
}

/// Writes to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrWriter;

impl LogWriter for StderrWriter {
    fn write(&self, _level: LogLevel, line: &str) {
        eprintln!("{}", line);
    }
}

/// Writes to the browser console, picking the console method by level.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleWriter;

#[cfg(target_arch = "wasm32")]
impl LogWriter for ConsoleWriter {
    fn write(&self, level: LogLevel, line: &str) {
        match level {
            LogLevel::Error => gloo_console::error!(line),
            LogLevel::Warn => gloo_console::warn!(line),
            LogLevel::Info => gloo_console::info!(line),
            LogLevel::Debug | LogLevel::Trace => gloo_console::debug!(line),
        }
    }
}

/// The writer for the current target: console in the browser, stderr
/// elsewhere.
pub fn default_writer() -> Box<dyn LogWriter> {
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(ConsoleWriter)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(StderrWriter)
    }
}

/// Formats every event at or above `min_level` as a [`LogEntry`].
pub struct StructuredLayer<W> {
    writer: W,
    min_level: LogLevel,
    format: LogFormat,
}

impl<W: LogWriter> StructuredLayer<W> {
    /// Create a layer writing JSON lines at info and above.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            min_level: LogLevel::Info,
            format: LogFormat::Json,
        }
    }

    /// Set minimum log level.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

impl<S, W> Layer<S> for StructuredLayer<W>
where
    S: Subscriber,
    W: LogWriter,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = LogLevel::from(metadata.level());
        if level < self.min_level {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let entry = LogEntry {
            level,
            message: visitor.message.unwrap_or_default(),
            target: metadata.target().to_string(),
            fields: visitor.fields,
        };
        self.writer.write(level, &entry.format(self.format));
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: BTreeMap<String, serde_json::Value>,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: serde_json::Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.insert(field, serde_json::json!(value));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, serde_json::json!(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let text = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(text);
        } else {
            self.insert(field, serde_json::json!(text));
        }
    }
}
