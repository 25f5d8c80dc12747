//! An HTTP client for remote suggestion endpoints.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::source::SuggestionFetcher;
use super::SuggestError;

/// Fetches suggestions with `GET {endpoint}?{query_param}={query}`.
pub struct HttpFetcher {
    client: Client,
    endpoint: String,
    query_param: String,
    api_token: Option<String>,
}

impl HttpFetcher {
    /// Creates a new `HttpFetcher`.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The URL that answers search queries.
    /// * `query_param` - The query-string parameter carrying the search text.
    /// * `api_token` - An optional bearer token sent with every request.
    /// * `timeout` - An optional per-request timeout; none by default.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        query_param: impl Into<String>,
        api_token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, SuggestError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
            query_param: query_param.into(),
            api_token,
        })
    }
}

#[async_trait]
impl SuggestionFetcher for HttpFetcher {
    async fn fetch(&self, query: &str) -> Result<String, SuggestError> {
        let mut request = self
            .client
            .get(&self.endpoint)
            .query(&[(self.query_param.as_str(), query)]);

        if let Some(ref token) = self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
