//! This module defines the different modes for the user interface.
use tracing::Level;

/// Represents the current mode of the user interface.
#[derive(Debug, Clone, Default)]
pub enum UIMode {
    /// The suggestion input with its dropdown.
    #[default]
    Input,
    /// The logs mode, where users can view and filter application logs.
    Logs {
        /// An optional filter string to apply to the logs.
        filter: Option<String>,
        /// The most verbose log level to display.
        level: Level,
    },
}
