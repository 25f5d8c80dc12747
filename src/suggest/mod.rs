//! This module defines the suggestion data model and the sources that
//! produce candidate suggestions for a query.
pub mod error;
pub mod filter;
pub mod http;
pub mod source;

pub use error::SuggestError;
pub use filter::{filter, highlight};
pub use http::HttpFetcher;
pub use source::{SuggestionFetcher, SuggestionSource};

use serde::{Deserialize, Serialize};

/// A single entry that can be offered in the dropdown.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub id: i64,
    pub name: String,
}

impl Suggestion {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// One item of a remote search response.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RawSuggestion {
    pub id: i64,
    pub title: String,
}

impl From<RawSuggestion> for Suggestion {
    fn from(raw: RawSuggestion) -> Self {
        Self {
            id: raw.id,
            name: raw.title,
        }
    }
}

/// The body returned by a remote suggestion endpoint.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SearchResponse {
    pub results: Vec<RawSuggestion>,
}
