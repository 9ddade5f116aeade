use thiserror::Error;

/// Errors returned by the storefront GraphQL client.
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// Network or TLS failure, or a non-2xx status from the endpoint.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid GraphQL endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The response carried no `data` object, only (possibly empty) `errors`.
    #[error("GraphQL response for {operation} has no data: {messages}")]
    MissingData { operation: String, messages: String },
}
