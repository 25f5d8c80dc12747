use chrono::{DateTime, Local, Utc};
use tracing::Level;

/// A captured `tracing` event, kept for the log view.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    /// Last path segment of the emitting module.
    pub module: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: Level, module: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            module: module.into(),
            message: message.into(),
        }
    }

    /// Formats the entry as one line of the log view.
    pub fn display_line(&self) -> String {
        format!(
            "{} {:5} [{}] {}",
            self.timestamp
                .with_timezone(&Local)
                .format("%H:%M:%S%.3f"),
            self.level.as_str(),
            self.module,
            self.message
        )
    }
}
