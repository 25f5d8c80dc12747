//! Configuration resolved from an optional JSON file, CLI flags and the
//! environment, in increasing order of precedence.
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use super::args::AppArgs;
use crate::logging::DEFAULT_LOG_FILTER;
use crate::suggest::Suggestion;
use crate::ui::autocomplete::DEFAULT_BLUR_DELAY;

pub const API_TOKEN_ENV: &str = "AUTOSUGGEST_API_TOKEN";
const DEFAULT_QUERY_PARAM: &str = "query";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("no suggestion source configured; set `endpoint` or `suggestions`")]
    MissingSource,
    #[error("both `endpoint` and `suggestions` are set; choose one")]
    AmbiguousSource,
}

/// The keys accepted in the config file. Every key is optional.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub query_param: Option<String>,
    pub api_token: Option<String>,
    pub timeout_ms: Option<u64>,
    pub suggestions: Option<PathBuf>,
    pub blur_delay_ms: Option<u64>,
    pub placeholder: Option<String>,
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceConfig {
    Static(PathBuf),
    Remote {
        endpoint: String,
        query_param: String,
        api_token: Option<String>,
        timeout: Option<Duration>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source: SourceConfig,
    pub blur_delay: Duration,
    pub placeholder: String,
    pub log_filter: String,
}

impl FileConfig {
    /// Reads a config file.
    ///
    /// A relative `suggestions` path is taken relative to the file itself.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: FileConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if let (Some(suggestions), Some(dir)) = (config.suggestions.as_mut(), path.parent()) {
            if suggestions.is_relative() {
                *suggestions = dir.join(&*suggestions);
            }
        }
        Ok(config)
    }

    /// Overlays the flags that were given on the command line.
    ///
    /// The source is replaced as a whole: naming either `--endpoint` or
    /// `--suggestions` discards both source keys from the file.
    pub fn merge_args(self, args: &AppArgs) -> Self {
        let (endpoint, suggestions) = if args.endpoint.is_some() || args.suggestions.is_some() {
            (args.endpoint.clone(), args.suggestions.clone())
        } else {
            (self.endpoint, self.suggestions)
        };

        Self {
            endpoint,
            query_param: args.query_param.clone().or(self.query_param),
            api_token: args.api_token.clone().or(self.api_token),
            timeout_ms: args.timeout_ms.or(self.timeout_ms),
            suggestions,
            blur_delay_ms: args.blur_delay_ms.or(self.blur_delay_ms),
            placeholder: args.placeholder.clone().or(self.placeholder),
            log_filter: args.log_filter.clone().or(self.log_filter),
        }
    }
}

impl Config {
    /// Resolves the effective configuration.
    ///
    /// # Arguments
    ///
    /// * `args` - The parsed command line; its `--config` file is loaded first.
    /// * `env_token` - The token from the environment, used when neither the
    ///   file nor the flags provide one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// suggestion source is missing or ambiguous.
    pub fn resolve(args: &AppArgs, env_token: Option<String>) -> Result<Self, ConfigError> {
        let file = match args.config {
            Some(ref path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::from_file_config(file.merge_args(args), env_token)
    }

    pub fn from_file_config(
        config: FileConfig,
        env_token: Option<String>,
    ) -> Result<Self, ConfigError> {
        let source = match (config.endpoint, config.suggestions) {
            (Some(_), Some(_)) => return Err(ConfigError::AmbiguousSource),
            (None, None) => return Err(ConfigError::MissingSource),
            (None, Some(path)) => SourceConfig::Static(path),
            (Some(endpoint), None) => SourceConfig::Remote {
                endpoint,
                query_param: config
                    .query_param
                    .unwrap_or_else(|| DEFAULT_QUERY_PARAM.to_string()),
                api_token: config.api_token.or(env_token),
                timeout: config.timeout_ms.map(Duration::from_millis),
            },
        };

        Ok(Self {
            source,
            blur_delay: config
                .blur_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_BLUR_DELAY),
            placeholder: config.placeholder.unwrap_or_default(),
            log_filter: config
                .log_filter
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

/// Reads a static suggestion list: a JSON array of `{id, name}`.
pub fn load_suggestions(path: &Path) -> Result<Vec<Suggestion>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
