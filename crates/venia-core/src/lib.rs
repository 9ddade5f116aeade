pub mod app_config;
pub mod config;
pub mod metadata;
pub mod store;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use metadata::{StoreConfigMetadata, StorePaths};
pub use store::{ExtensionVersion, StoreConfig, StoreContext};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised while reading the page's store-config metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Neither `meta[name="store-config"]` nor the body fallback is present.
    #[error("store-config metadata not found on page")]
    Missing,

    #[error("store-config metadata is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("store-config metadata has no storeRootUrl")]
    MissingStoreRootUrl,
}
