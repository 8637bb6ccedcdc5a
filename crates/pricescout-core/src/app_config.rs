use std::net::SocketAddr;

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub serpapi_api_key: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_max_concurrent_fetches: usize,
    pub similarity_threshold: f64,
    pub discovery_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("serpapi_api_key", &"[redacted]")
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field(
                "scraper_max_concurrent_fetches",
                &self.scraper_max_concurrent_fetches,
            )
            .field("similarity_threshold", &self.similarity_threshold)
            .field("discovery_timeout_secs", &self.discovery_timeout_secs)
            .finish()
    }
}
