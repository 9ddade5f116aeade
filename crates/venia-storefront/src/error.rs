use std::time::Duration;

use thiserror::Error;
use venia_core::MetadataError;
use venia_graphql::GraphqlError;

/// Errors raised by individual bootstrap steps.
///
/// The orchestrator logs these and skips the dependent steps; they never
/// reach the page.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("timed out after {waited:?} waiting for {global}")]
    WaitTimedOut {
        global: &'static str,
        waited: Duration,
    },

    #[error("page torn down while waiting for {global}")]
    TornDown { global: &'static str },

    #[error("{global} is not defined")]
    NotDefined { global: &'static str },

    #[error("store-config metadata unavailable: {0}")]
    Metadata(#[from] MetadataError),
}

/// Errors raised by the add-to-wishlist event bridge.
#[derive(Debug, Error)]
pub enum WishlistError {
    #[error("wishlist event detail is not valid JSON: {0}")]
    InvalidDetail(#[from] serde_json::Error),

    #[error("wishlist event detail must be an array of items, got {0}")]
    NotAnArray(&'static str),

    #[error("wishlist mutation failed for sku {sku}: {source}")]
    Mutation {
        sku: String,
        #[source]
        source: GraphqlError,
    },
}
