//! Storefront GraphQL request and response shapes.
//!
//! Every response is wrapped in the standard `{"data": ..., "errors": [...]}`
//! envelope; [`GraphqlResponse`] captures that pattern generically.

use serde::{Deserialize, Serialize};
use venia_core::{StoreConfig, StoreContext};

#[derive(Debug, Serialize)]
pub(crate) struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphqlErrorEntry {
    pub message: String,
}

// ---------------------------------------------------------------------------
// DataServicesStorefrontInstanceContext
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct StorefrontContextData {
    #[serde(rename = "dataServicesStorefrontInstanceContext", default)]
    pub instance_context: Option<serde_json::Value>,
    #[serde(rename = "storeConfig", default)]
    pub store_config: Option<serde_json::Value>,
}

/// Result of the storefront-instance-context query.
#[derive(Debug, Clone, Default)]
pub struct StorefrontContext {
    /// `None` when the backend returned `null` or omitted the field.
    pub instance: Option<StoreContext>,
    pub store_config: Option<StoreConfig>,
}

// ---------------------------------------------------------------------------
// DataServicesMagentoExtensionContext
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ExtensionContextData {
    #[serde(rename = "dataServicesMagentoExtensionContext", default)]
    pub extension_context: Option<ExtensionContext>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExtensionContext {
    #[serde(default)]
    pub magento_extension_version: Option<String>,
}

// ---------------------------------------------------------------------------
// addProductsToWishlist
// ---------------------------------------------------------------------------

/// A single wishlist item as dispatched by the page in an
/// `aem.cif.add-to-wishlist` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItemInput {
    pub sku: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_sku: Option<String>,
    /// Option UIDs for configurable products.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_options: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entered_options: Vec<EnteredOption>,
}

fn default_quantity() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnteredOption {
    pub uid: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddToWishlistData {
    #[serde(rename = "addProductsToWishlist")]
    pub add_products_to_wishlist: Option<AddToWishlistOutput>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddToWishlistOutput {
    #[serde(default)]
    pub user_errors: Vec<WishlistUserError>,
}

/// A business-rule rejection reported by `addProductsToWishlist`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WishlistUserError {
    pub code: String,
    pub message: String,
}
