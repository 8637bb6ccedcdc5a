//! Bounded page fetching with outcome classification.

use std::time::Duration;

use pricescout_core::Candidate;
use reqwest::Client;

use crate::error::ScrapeError;
use crate::types::FetchOutcome;

/// Rotating outbound identities. `attempt_index` selects one purely to vary
/// the request fingerprint across candidates; it carries no retry semantics.
const USER_AGENTS: [&str; 4] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
];

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// One-shot HTTP GET per candidate with a fixed timeout and redirect
/// following. Owns the pooled client for the duration of a single
/// aggregation call.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Creates a fetcher with the given per-request timeout.
    ///
    /// TLS certificate validation is deliberately relaxed: third-party shop
    /// pages routinely ship misconfigured or expired chains, and a listing
    /// we only read prices from is not worth losing over a cert error. This
    /// is a conscious trust relaxation, scoped to outbound scraping only.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches one candidate page and classifies the outcome.
    ///
    /// Non-2xx statuses, timeouts, and transport failures are all terminal
    /// for this candidate only — classification, never an `Err`. No retries
    /// happen here; retry-on-empty is a caller-level policy.
    pub async fn fetch(&self, candidate: &Candidate, attempt_index: usize) -> FetchOutcome {
        let user_agent = USER_AGENTS[attempt_index % USER_AGENTS.len()];
        let referer = referer_for(&candidate.url);

        let response = self
            .client
            .get(&candidate.url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::REFERER, referer)
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await;

        let response = match response {
            Ok(resp) => resp,
            Err(err) if err.is_timeout() => return FetchOutcome::Timeout,
            Err(err) => {
                return FetchOutcome::Network {
                    message: err.to_string(),
                }
            }
        };

        let status = response.status();
        if !status.is_success() {
            return FetchOutcome::HttpStatus {
                status: status.as_u16(),
            };
        }

        let final_url = response.url().to_string();
        match response.text().await {
            Ok(body) => FetchOutcome::Success { body, final_url },
            Err(err) if err.is_timeout() => FetchOutcome::Timeout,
            Err(err) => FetchOutcome::Network {
                message: err.to_string(),
            },
        }
    }
}

/// Referer appropriate to the target domain. Marketplace sites expect
/// internal navigation; everything else gets a search-engine referrer.
fn referer_for(url: &str) -> &'static str {
    let host = host_of(url).unwrap_or_default();
    if host.contains("amazon.") {
        "https://www.amazon.com/"
    } else if host.ends_with("flipkart.com") {
        "https://www.flipkart.com/"
    } else if host.contains("ebay.") {
        "https://www.ebay.com/"
    } else {
        "https://www.google.com/"
    }
}

fn host_of(url: &str) -> Option<String> {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
}
