//! The main entry point for the autosuggest terminal widget.
mod app;
mod logging;
mod suggest;
mod ui;

use anyhow::Result;

/// The main function of the application.
///
/// Parses the command line, builds the suggestion source and runs the
/// terminal UI until the user exits.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the terminal UI
/// fails.
#[tokio::main]
async fn main() -> Result<()> {
    app::launch().await
}
