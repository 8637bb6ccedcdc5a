use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search API error: {0}")]
    Api(String),

    #[error("failed to deserialize {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
