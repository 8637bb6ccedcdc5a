use serde::{Deserialize, Serialize};

/// A (site name, URL) pair supplied by the discovery layer, to be fetched
/// and mined for a product listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub site_name: String,
    pub url: String,
}

impl Candidate {
    pub fn new(site_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            url: url.into(),
        }
    }
}

/// One normalized price listing, ready for the API surface.
///
/// Invariants upheld by the aggregator: `price` parses as a non-negative
/// finite decimal, `currency` and `source` are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResult {
    pub link: String,
    pub price: String,
    pub currency: String,
    pub product_name: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
}
