//! Logging infrastructure for the terminal UI: a `tracing` layer that
//! captures events and a buffer that batches them to the log view.
pub mod buffer;
pub mod collector;

pub use buffer::LogBuffer;
pub use collector::TUILogCollector;

/// Filter used when neither the CLI nor the config file provides one.
pub const DEFAULT_LOG_FILTER: &str = "info,autosuggest=debug";
