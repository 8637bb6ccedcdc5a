//! Concurrent product-page scraping pipeline.
//!
//! Given a query and a list of candidate shop URLs, fetches every page
//! concurrently, runs an extraction cascade over the HTML, scores each
//! extracted product against the query, and folds the survivors into a
//! deduplicated, price-sorted result set.

mod aggregate;
mod error;
pub mod extract;
mod fetch;
mod price;
mod relevance;
mod types;

pub use aggregate::{
    aggregate, AggregateOptions, DEFAULT_SIMILARITY_THRESHOLD, MAX_RESULTS,
};
pub use error::ScrapeError;
pub use extract::extract_product;
pub use fetch::PageFetcher;
pub use price::scan_price;
pub use relevance::similarity;
pub use types::{ExtractedRecord, FetchOutcome};
