use serde::Deserialize;

/// Slice of the SerpApi response we actually consume. Unknown fields are
/// ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganicResult {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}
