//! Concurrent fetch→extract→score fan-out with a single fan-in point.
//!
//! Every candidate runs its whole pipeline independently; the only
//! synchronization is the final gather, which waits for all tasks and
//! never aborts the batch on one candidate's failure. The pooled HTTP
//! client lives exactly as long as one `aggregate` call.

use std::collections::HashSet;

use futures::StreamExt;
use pricescout_core::{markets, Candidate, ProductResult};

use crate::error::ScrapeError;
use crate::extract::extract_product;
use crate::fetch::PageFetcher;
use crate::relevance::similarity;
use crate::types::FetchOutcome;

/// Hard cap on the returned result set.
pub const MAX_RESULTS: usize = 25;

/// Default relevance acceptance cutoff. Tunable: 0.3 favors coverage,
/// 0.5 favors precision.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.3;

/// Near-identical names from different strategies differ in tails and
/// whitespace; comparing a fixed prefix collapses them without
/// over-filtering.
const DEDUP_NAME_PREFIX_CHARS: usize = 40;

#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Per-candidate request timeout in seconds.
    pub timeout_secs: u64,
    /// Minimum relevance score for a result to be accepted.
    pub similarity_threshold: f64,
    /// Upper bound on in-flight fetches.
    pub max_concurrent: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            max_concurrent: 16,
        }
    }
}

/// Run the full pipeline over all candidates and return a deduplicated,
/// price-sorted result set capped at [`MAX_RESULTS`].
///
/// Per-candidate fetch failures, extraction misses, and relevance
/// rejections are absorbed; the result is the best-effort union of
/// everything that succeeded.
///
/// # Errors
///
/// - [`ScrapeError::InvalidQuery`] / [`ScrapeError::InvalidCountry`] —
///   malformed input, rejected before any network activity.
/// - [`ScrapeError::Http`] — the HTTP client could not be constructed.
pub async fn aggregate(
    query: &str,
    country: &str,
    candidates: Vec<Candidate>,
    options: &AggregateOptions,
) -> Result<Vec<ProductResult>, ScrapeError> {
    validate(query, country)?;

    // Empty discovery means "no results", not an error.
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    tracing::info!(query, country, candidates = candidates.len(), "starting price aggregation");

    // One pooled client per call, dropped with the fetcher on every exit path.
    let fetcher = PageFetcher::new(options.timeout_secs)?;
    let fetcher = &fetcher;
    let threshold = options.similarity_threshold;
    let concurrency = options.max_concurrent.clamp(1, candidates.len());

    let mut outcomes: Vec<(usize, Option<ProductResult>)> =
        futures::stream::iter(candidates.into_iter().enumerate())
            .map(|(index, candidate)| async move {
                let result =
                    scrape_candidate(fetcher, &candidate, index, query, country, threshold).await;
                (index, result)
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

    // Completion order is nondeterministic; restore submission order so
    // first-seen-wins dedup and sort tie-breaks are reproducible.
    outcomes.sort_by_key(|(index, _)| *index);

    let mut seen = HashSet::new();
    let mut results: Vec<ProductResult> = Vec::new();
    for result in outcomes.into_iter().filter_map(|(_, r)| r) {
        let key = (dedup_name_key(&result.product_name), result.price.clone());
        if seen.insert(key) {
            results.push(result);
        }
    }

    // sort_by is stable: equal prices keep first-seen order.
    results.sort_by(|a, b| {
        price_value(&a.price)
            .partial_cmp(&price_value(&b.price))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results.truncate(MAX_RESULTS);

    tracing::info!(results = results.len(), "price aggregation finished");
    Ok(results)
}

/// One candidate's full pipeline: fetch → extract → score → normalize.
/// Returns `None` for every absorbed failure mode.
async fn scrape_candidate(
    fetcher: &PageFetcher,
    candidate: &Candidate,
    attempt_index: usize,
    query: &str,
    country: &str,
    threshold: f64,
) -> Option<ProductResult> {
    let (body, final_url) = match fetcher.fetch(candidate, attempt_index).await {
        FetchOutcome::Success { body, final_url } => (body, final_url),
        FetchOutcome::HttpStatus { status } => {
            tracing::warn!(site = %candidate.site_name, url = %candidate.url, status, "fetch returned error status");
            return None;
        }
        FetchOutcome::Timeout => {
            tracing::warn!(site = %candidate.site_name, url = %candidate.url, "fetch timed out");
            return None;
        }
        FetchOutcome::Network { message } => {
            tracing::warn!(site = %candidate.site_name, url = %candidate.url, error = %message, "fetch failed");
            return None;
        }
    };

    let record = extract_product(&body, &final_url)?;

    let score = similarity(query, &record.product_name);
    if score < threshold {
        tracing::debug!(
            site = %candidate.site_name,
            name = %record.product_name,
            score,
            threshold,
            "extracted product below relevance threshold"
        );
        return None;
    }

    // Upholds the result-set invariant: price parses as a finite
    // non-negative decimal or the record is dropped.
    let value = record.price.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    let currency = record
        .currency
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| markets::default_currency(country).to_string());

    Some(ProductResult {
        link: record.link,
        price: record.price,
        currency,
        product_name: record.product_name,
        source: candidate.site_name.clone(),
        availability: record.availability,
    })
}

/// Malformed input is the only pipeline-fatal condition, checked before
/// any network activity.
fn validate(query: &str, country: &str) -> Result<(), ScrapeError> {
    if query.trim().is_empty() {
        return Err(ScrapeError::InvalidQuery {
            reason: "query must not be blank".to_string(),
        });
    }
    if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ScrapeError::InvalidCountry {
            country: country.to_string(),
            reason: "expected a two-letter country code".to_string(),
        });
    }
    Ok(())
}

fn dedup_name_key(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .take(DEDUP_NAME_PREFIX_CHARS)
        .collect()
}

/// Numeric sort key. Prices are validated at acceptance time, so the
/// fallback never fires in practice; it just keeps unparseable values last.
fn price_value(price: &str) -> f64 {
    price.parse::<f64>().unwrap_or(f64::INFINITY)
}
