mod app_config;
mod config;
pub mod markets;
mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use types::{Candidate, ProductResult};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
