//! Web-search client (SerpAPI). Used exactly once per interview session to
//! bias the question style; every failure here is degradable by the caller.

use serde::Deserialize;
use thiserror::Error;

const SERPAPI_URL: &str = "https://serpapi.com/search.json";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("search returned no results")]
    NoResults,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    snippet: Option<String>,
}

#[derive(Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    api_key: String,
}

impl SearchClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Runs one web search and returns the organic-result snippets joined
    /// into a single text blob. Truncation to a prompt-sized prefix is the
    /// caller's concern.
    pub async fn search(&self, query: &str) -> Result<String, SearchError> {
        let response = self
            .client
            .get(SERPAPI_URL)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("api_key", &self.api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SearchResponse = response.json().await?;
        let joined = join_snippets(&body);
        if joined.is_empty() {
            return Err(SearchError::NoResults);
        }
        Ok(joined)
    }
}

fn join_snippets(response: &SearchResponse) -> String {
    response
        .organic_results
        .iter()
        .filter_map(|r| r.snippet.as_deref())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
