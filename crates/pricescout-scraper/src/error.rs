use thiserror::Error;

/// Pipeline-fatal failures.
///
/// Per-candidate fetch and extraction failures are never surfaced through
/// this type; they are absorbed inside the aggregator and the affected
/// candidate simply contributes no result. The only fatal conditions are
/// malformed input (rejected before any network activity) and failure to
/// construct the HTTP client itself.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    #[error("invalid country code \"{country}\": {reason}")]
    InvalidCountry { country: String, reason: String },
}
