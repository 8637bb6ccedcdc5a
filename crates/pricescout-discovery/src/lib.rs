//! Candidate URL discovery via SerpApi.
//!
//! Sits in front of the scraping pipeline: given a product query and a
//! two-letter country code, returns the shop pages worth fetching.

mod client;
mod error;
mod types;

pub use client::DiscoveryClient;
pub use error::DiscoveryError;
