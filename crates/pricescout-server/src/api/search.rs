//! The `POST /search` handler: discovery, aggregation, and the
//! retry-once-on-empty policy.

use std::time::Duration;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use pricescout_core::ProductResult;
use pricescout_scraper::{aggregate, AggregateOptions, ScrapeError};

use super::{ApiError, AppState};

/// Wait before the second pass when the first returns nothing. Shops
/// throttle erratically; one cheap retry recovers most transient empties.
const EMPTY_RETRY_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "US".to_string()
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub country: String,
    pub results: Vec<ProductResult>,
}

pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = request.query.trim().to_string();
    let country = request.country.trim().to_uppercase();
    validate(&query, &country)?;

    let mut results = search_once(&state, &query, &country).await?;
    if results.is_empty() {
        tracing::info!(query = %query, country = %country, "no results on first pass, retrying once");
        tokio::time::sleep(EMPTY_RETRY_BACKOFF).await;
        results = search_once(&state, &query, &country).await?;
    }

    Ok(Json(SearchResponse {
        query,
        country,
        results,
    }))
}

/// Rejects malformed requests before any outbound call is made.
fn validate(query: &str, country: &str) -> Result<(), ApiError> {
    if query.is_empty() {
        return Err(ApiError::new("validation_error", "query must not be blank"));
    }
    if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ApiError::new(
            "validation_error",
            format!("invalid country code \"{country}\": expected a two-letter code"),
        ));
    }
    Ok(())
}

async fn search_once(
    state: &AppState,
    query: &str,
    country: &str,
) -> Result<Vec<ProductResult>, ApiError> {
    let candidates = state
        .discovery
        .search_candidates(query, country)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "candidate discovery failed");
            ApiError::new("internal_error", "candidate discovery failed")
        })?;

    let options = AggregateOptions {
        timeout_secs: state.config.scraper_request_timeout_secs,
        similarity_threshold: state.config.similarity_threshold,
        max_concurrent: state.config.scraper_max_concurrent_fetches,
    };

    aggregate(query, country, candidates, &options)
        .await
        .map_err(|e| match e {
            ScrapeError::InvalidQuery { .. } | ScrapeError::InvalidCountry { .. } => {
                ApiError::new("validation_error", e.to_string())
            }
            ScrapeError::Http(source) => {
                tracing::error!(error = %source, "failed to construct scrape client");
                ApiError::new("internal_error", "price aggregation failed")
            }
        })
}
