//! HTTP client for the SerpApi Google Search API.
//!
//! Turns a product query and country code into a short list of candidate
//! shop URLs by running a shopping-intent web search and keeping the top
//! organic results. API-level failures are surfaced as
//! [`DiscoveryError::Api`]; an empty result page is a normal outcome.

use std::time::Duration;

use reqwest::{Client, Url};

use pricescout_core::{markets, Candidate};

use crate::error::DiscoveryError;
use crate::types::SearchResponse;

const DEFAULT_BASE_URL: &str = "https://serpapi.com/";

/// Appended to every query to bias results toward product listings rather
/// than reviews and news.
const SHOPPING_SUFFIX: &str = "buy online";

/// Organic results kept per search. Anything past the first page of
/// results is noise for price discovery.
const MAX_CANDIDATES: usize = 10;

/// Client for the SerpApi search endpoint.
///
/// Use [`DiscoveryClient::new`] for production or
/// [`DiscoveryClient::with_base_url`] to point at a mock server in tests.
pub struct DiscoveryClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl DiscoveryClient {
    /// Creates a new client pointed at the production SerpApi endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, DiscoveryError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`DiscoveryError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, DiscoveryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("pricescout/0.1 (price-discovery)")
            .build()?;

        // Ensure exactly one trailing slash so joining "search.json" appends
        // a path segment instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| DiscoveryError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Discovers candidate shop pages for a product query in a country.
    ///
    /// Runs a localized Google search via SerpApi with a shopping-intent
    /// suffix and returns up to [`MAX_CANDIDATES`] organic results as
    /// [`Candidate`]s. Results without a link are skipped; an empty organic
    /// list yields an empty vec, not an error.
    ///
    /// # Errors
    ///
    /// - [`DiscoveryError::Api`] if SerpApi reports an error in the body.
    /// - [`DiscoveryError::Http`] on network failure or non-2xx HTTP status.
    /// - [`DiscoveryError::Deserialize`] if the response is not valid JSON.
    pub async fn search_candidates(
        &self,
        query: &str,
        country: &str,
    ) -> Result<Vec<Candidate>, DiscoveryError> {
        let location = markets::location_name(country);
        let url = self.build_url(&format!("{query} {SHOPPING_SUFFIX}"), location);

        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        let response: SearchResponse =
            serde_json::from_value(body).map_err(|e| DiscoveryError::Deserialize {
                context: format!("search(query={query}, country={country})"),
                source: e,
            })?;

        let candidates: Vec<Candidate> = response
            .organic_results
            .into_iter()
            .filter_map(|result| {
                let link = result.link?;
                let site_name = result
                    .source
                    .filter(|s| !s.is_empty())
                    .or_else(|| host_of(&link))
                    .unwrap_or_else(|| "Unknown".to_string());
                Some(Candidate::new(site_name, link))
            })
            .take(MAX_CANDIDATES)
            .collect();

        tracing::debug!(query, country, candidates = candidates.len(), "discovery complete");
        Ok(candidates)
    }

    /// Builds the `search.json` URL with percent-encoded query parameters.
    fn build_url(&self, query: &str, location: &str) -> Url {
        let mut url = self
            .base_url
            .join("search.json")
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("engine", "google");
            pairs.append_pair("q", query);
            pairs.append_pair("location", location);
            pairs.append_pair("api_key", &self.api_key);
        }
        url
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, DiscoveryError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| DiscoveryError::Deserialize {
            context: "search response body".to_string(),
            source: e,
        })
    }

    /// SerpApi signals failure with an `"error"` field in an otherwise-200
    /// response body.
    fn check_api_error(body: &serde_json::Value) -> Result<(), DiscoveryError> {
        if let Some(message) = body.get("error").and_then(serde_json::Value::as_str) {
            return Err(DiscoveryError::Api(message.to_string()));
        }
        Ok(())
    }
}

fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}
