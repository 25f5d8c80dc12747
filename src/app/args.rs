use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "autosuggest")]
#[command(about = "A terminal text input with a live suggestion dropdown")]
pub struct AppArgs {
    #[arg(long, help = "JSON config file path")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Search endpoint answering with {\"results\": [{id, title}]}")]
    pub endpoint: Option<String>,

    #[arg(long, help = "Query-string parameter carrying the search text [default: query]")]
    pub query_param: Option<String>,

    #[arg(
        long = "api-token",
        help = "Bearer token for the endpoint (or set AUTOSUGGEST_API_TOKEN)"
    )]
    pub api_token: Option<String>,

    #[arg(long, help = "Request timeout in milliseconds (none by default)")]
    pub timeout_ms: Option<u64>,

    #[arg(long, help = "JSON file with a fixed [{id, name}] suggestion list")]
    pub suggestions: Option<PathBuf>,

    #[arg(long, help = "Delay before closing the dropdown on blur [default: 200]")]
    pub blur_delay_ms: Option<u64>,

    #[arg(long, help = "Text shown while the input is empty")]
    pub placeholder: Option<String>,

    #[arg(long, help = "tracing filter for the log view [default: info,autosuggest=debug]")]
    pub log_filter: Option<String>,
}

impl AppArgs {
    pub fn from_cli() -> Self {
        <Self as Parser>::parse()
    }
}
