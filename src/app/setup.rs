//! Turns the command line and config file into a ready-to-run widget.
use super::args::AppArgs;
use super::config::{load_suggestions, Config, SourceConfig, API_TOKEN_ENV};
use crate::suggest::{HttpFetcher, SuggestionSource};
use crate::ui::AutocompleteMode;
use anyhow::Result;

/// Everything the terminal session needs.
pub struct PreparedApp {
    /// The autocomplete controller, already bound to its source.
    pub autocomplete: AutocompleteMode,
    /// The `tracing` filter for the log view.
    pub log_filter: String,
}

/// Prepares the application for running.
///
/// This function performs the following steps:
/// 1. Resolves the configuration (file, flags, environment).
/// 2. Builds the suggestion source, loading the static list or creating
///    the HTTP client.
/// 3. Builds the autocomplete controller.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the suggestion file
/// cannot be loaded, or the HTTP client cannot be built.
pub fn prepare(args: AppArgs) -> Result<PreparedApp> {
    let config = Config::resolve(&args, std::env::var(API_TOKEN_ENV).ok())?;
    let source = build_source(&config.source)?;

    let autocomplete =
        AutocompleteMode::new(source, config.blur_delay).with_placeholder(config.placeholder);

    Ok(PreparedApp {
        autocomplete,
        log_filter: config.log_filter,
    })
}

fn build_source(config: &SourceConfig) -> Result<SuggestionSource> {
    match config {
        SourceConfig::Static(path) => Ok(SuggestionSource::from_list(load_suggestions(path)?)),
        SourceConfig::Remote {
            endpoint,
            query_param,
            api_token,
            timeout,
        } => {
            let fetcher =
                HttpFetcher::new(endpoint.clone(), query_param.clone(), api_token.clone(), *timeout)?;
            Ok(SuggestionSource::remote(fetcher))
        }
    }
}
