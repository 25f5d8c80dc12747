//! A `tracing` layer that feeds captured events into a `LogBuffer`.
use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{Event, Subscriber};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    registry::LookupSpan,
    EnvFilter, Layer,
};

use super::LogBuffer;
use crate::ui::LogEntry;

pub struct TUILogCollector {
    buffer: Arc<LogBuffer>,
}

impl TUILogCollector {
    pub fn new(buffer: Arc<LogBuffer>) -> Self {
        Self { buffer }
    }

    /// Installs the collector, behind `filter`, as the global subscriber.
    ///
    /// Nothing is written to the terminal directly; entries only reach the
    /// log view.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter is invalid or a global subscriber is
    /// already set.
    pub fn init_subscriber(
        buffer: Arc<LogBuffer>,
        filter: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::try_new(filter)?)
            .with(TUILogCollector::new(buffer));

        tracing::subscriber::set_global_default(subscriber)?;
        Ok(())
    }
}

impl<S> Layer<S> for TUILogCollector
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let module = metadata
            .module_path()
            .and_then(|path| path.rsplit("::").next())
            .unwrap_or_else(|| metadata.target());

        self.buffer
            .add_entry(LogEntry::new(*metadata.level(), module, visitor.finish()));
    }
}

/// Collects the `message` field followed by any other fields as `key=value`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }

    fn push_field(&mut self, name: &str, value: impl std::fmt::Display) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", name, value);
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.push_field(field.name(), format!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), value);
        }
    }
}
