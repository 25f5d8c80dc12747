//! Errors produced while resolving suggestions.
use thiserror::Error;

/// The message shown below the input whenever a lookup fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch suggestions. Please try again later.";

/// A failed suggestion lookup.
///
/// Transport and decoding failures are kept apart for logging, but both
/// surface to the user through the same message.
#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("suggestion request failed: {0}")]
    Request(String),
    #[error("suggestion response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SuggestError {
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}

impl From<reqwest::Error> for SuggestError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}
