//! HTTP client for the storefront GraphQL endpoint.
//!
//! Wraps `reqwest` with envelope handling: every call POSTs
//! `{query, variables}` and returns the typed `data` object. Entries in the
//! `errors` array are logged; they only become an error when `data` is absent.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use venia_core::{AppConfig, ExtensionVersion, StoreConfig, StoreContext};

use crate::error::GraphqlError;
use crate::queries;
use crate::types::{
    AddToWishlistData, ExtensionContextData, GraphqlRequest, GraphqlResponse, StorefrontContext,
    StorefrontContextData, WishlistItemInput, WishlistUserError,
};

/// Client for a single storefront GraphQL endpoint.
#[derive(Clone)]
pub struct GraphqlClient {
    client: Client,
    endpoint: Url,
}

impl GraphqlClient {
    /// Creates a client that POSTs to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GraphqlError::InvalidEndpoint`] if
    /// `endpoint` is not an absolute URL.
    pub fn new(endpoint: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, GraphqlError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let endpoint = Url::parse(endpoint).map_err(|e| GraphqlError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, endpoint })
    }

    /// Creates a client for the endpoint and HTTP settings in `config`.
    ///
    /// # Errors
    ///
    /// See [`GraphqlClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, GraphqlError> {
        Self::new(
            &config.graphql_endpoint(),
            config.http_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches the storefront instance context and store config.
    ///
    /// A `null` instance context is not an error: it yields
    /// `StorefrontContext { instance: None, .. }`. A present context is always
    /// returned with its raw object, even when some of its fields have
    /// unexpected types. A `storeConfig` that does not parse is logged and
    /// dropped.
    ///
    /// # Errors
    ///
    /// - [`GraphqlError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GraphqlError::Deserialize`] if the body is not a GraphQL response.
    /// - [`GraphqlError::MissingData`] if the response has no `data`.
    pub async fn storefront_instance_context(&self) -> Result<StorefrontContext, GraphqlError> {
        let data: StorefrontContextData = self
            .execute(
                "DataServicesStorefrontInstanceContext",
                queries::STOREFRONT_INSTANCE_CONTEXT,
                serde_json::json!({}),
            )
            .await?;

        let instance = data
            .instance_context
            .filter(|value| !value.is_null())
            .map(StoreContext::from_json);

        let store_config = data
            .store_config
            .filter(|value| !value.is_null())
            .and_then(|value| match serde_json::from_value::<StoreConfig>(value) {
                Ok(store_config) => Some(store_config),
                Err(err) => {
                    tracing::warn!(error = %err, "ignoring malformed storeConfig");
                    None
                }
            });

        Ok(StorefrontContext {
            instance,
            store_config,
        })
    }

    /// Fetches the installed commerce extension version.
    ///
    /// Returns `Ok(None)` when the backend has no extension context.
    ///
    /// # Errors
    ///
    /// - [`GraphqlError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GraphqlError::Deserialize`] if the body does not match the expected shape.
    /// - [`GraphqlError::MissingData`] if the response has no `data`.
    pub async fn magento_extension_version(
        &self,
    ) -> Result<Option<ExtensionVersion>, GraphqlError> {
        let data: ExtensionContextData = self
            .execute(
                "DataServicesMagentoExtensionContext",
                queries::MAGENTO_EXTENSION_CONTEXT,
                serde_json::json!({}),
            )
            .await?;

        Ok(data
            .extension_context
            .and_then(|ctx| ctx.magento_extension_version)
            .map(ExtensionVersion))
    }

    /// Adds one item to the wishlist identified by `wishlist_id`.
    ///
    /// Returns the `user_errors` the backend reported; an empty vector means
    /// the item was accepted.
    ///
    /// # Errors
    ///
    /// - [`GraphqlError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GraphqlError::Deserialize`] if the body does not match the expected shape.
    /// - [`GraphqlError::MissingData`] if the response has no `data`.
    pub async fn add_product_to_wishlist(
        &self,
        wishlist_id: &str,
        item: &WishlistItemInput,
    ) -> Result<Vec<WishlistUserError>, GraphqlError> {
        let data: AddToWishlistData = self
            .execute(
                "AddProductToWishlist",
                queries::ADD_PRODUCT_TO_WISHLIST,
                serde_json::json!({ "wishlistId": wishlist_id, "itemOptions": item }),
            )
            .await?;

        Ok(data
            .add_products_to_wishlist
            .map(|out| out.user_errors)
            .unwrap_or_default())
    }

    /// POSTs a GraphQL document and deserializes the `data` object.
    ///
    /// # Errors
    ///
    /// - [`GraphqlError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GraphqlError::Deserialize`] if the body does not match `T`.
    /// - [`GraphqlError::MissingData`] if `data` is absent or `null`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, GraphqlError> {
        tracing::debug!(operation, endpoint = %self.endpoint, "sending GraphQL request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&GraphqlRequest { query, variables })
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let envelope: GraphqlResponse<T> =
            serde_json::from_str(&body).map_err(|e| GraphqlError::Deserialize {
                context: operation.to_owned(),
                source: e,
            })?;

        let messages = envelope
            .errors
            .iter()
            .map(|err| err.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        if !envelope.errors.is_empty() {
            tracing::warn!(operation, errors = %messages, "GraphQL response carried errors");
        }

        envelope.data.ok_or_else(|| GraphqlError::MissingData {
            operation: operation.to_owned(),
            messages,
        })
    }
}
