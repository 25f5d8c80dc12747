//! This module resolves the candidate set for a query, either from a fixed
//! list supplied up front or from an asynchronous remote lookup.
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{SearchResponse, SuggestError, Suggestion};

/// A remote lookup that returns the raw response body for a query.
#[async_trait]
pub trait SuggestionFetcher {
    /// Issues one lookup for `query`.
    ///
    /// # Errors
    ///
    /// Returns `SuggestError::Request` if the lookup itself fails.
    async fn fetch(&self, query: &str) -> Result<String, SuggestError>;
}

/// Where candidate suggestions come from, decided once at construction.
#[derive(Clone)]
pub enum SuggestionSource {
    /// A caller-supplied list used verbatim for every query.
    Static(Arc<[Suggestion]>),
    /// A remote lookup issued once per query change.
    Remote(Arc<dyn SuggestionFetcher + Send + Sync>),
}

impl SuggestionSource {
    pub fn from_list(list: Vec<Suggestion>) -> Self {
        Self::Static(list.into())
    }

    pub fn remote<F>(fetcher: F) -> Self
    where
        F: SuggestionFetcher + Send + Sync + 'static,
    {
        Self::Remote(Arc::new(fetcher))
    }

    /// Returns the fixed candidate list when no lookup is ever needed.
    pub fn static_candidates(&self) -> Option<&[Suggestion]> {
        match self {
            Self::Static(list) => Some(list.as_ref()),
            Self::Remote(_) => None,
        }
    }

    /// Produces the candidate set for `query`.
    ///
    /// A static list is returned unchanged whatever the query. A remote source
    /// fetches once, decodes the body and maps each `title` into a `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails or its body cannot be decoded.
    pub async fn resolve(&self, query: &str) -> Result<Vec<Suggestion>, SuggestError> {
        match self {
            Self::Static(list) => Ok(list.to_vec()),
            Self::Remote(fetcher) => {
                let body = fetcher.fetch(query).await?;
                let response: SearchResponse = serde_json::from_str(&body)?;
                debug!(
                    "Fetched {} candidates for '{}'",
                    response.results.len(),
                    query
                );
                Ok(response.results.into_iter().map(Suggestion::from).collect())
            }
        }
    }
}

impl fmt::Debug for SuggestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(list) => f.debug_tuple("Static").field(&list.len()).finish(),
            Self::Remote(_) => f.write_str("Remote"),
        }
    }
}
