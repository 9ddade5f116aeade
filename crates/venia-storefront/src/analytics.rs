//! Payloads pushed into the storefront events SDK.

use serde::Serialize;
use venia_core::{ExtensionVersion, StoreConfig, StoreContext};

/// Placeholder logged in place of any identity field the backend did not send.
pub const MISSING_FIELD: &str = "_MISSING_";

/// The `context` namespace of `window.magentoStorefrontEvents`.
pub trait StorefrontEvents: Send + Sync {
    fn set_magento_extension(&self, extension: MagentoExtension);
    fn set_page(&self, page: PageContext);
    fn set_storefront_instance(&self, instance: StorefrontInstance);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MagentoExtension {
    pub magento_extension_version: Option<String>,
}

impl MagentoExtension {
    #[must_use]
    pub fn new(version: Option<&ExtensionVersion>) -> Self {
        Self {
            magento_extension_version: version.map(|v| v.as_str().to_owned()),
        }
    }
}

/// Page descriptor. The bootstrap always reports a product detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContext {
    #[serde(rename = "pageType")]
    pub page_type: String,
    #[serde(rename = "maxXOffset")]
    pub max_x_offset: i32,
    #[serde(rename = "maxYOffset")]
    pub max_y_offset: i32,
    #[serde(rename = "minXOffset")]
    pub min_x_offset: i32,
    #[serde(rename = "minYOffset")]
    pub min_y_offset: i32,
    pub ping_interval: u32,
    pub pings: u32,
}

impl PageContext {
    #[must_use]
    pub fn product_detail() -> Self {
        Self {
            page_type: "pdp".to_owned(),
            max_x_offset: 0,
            max_y_offset: 0,
            min_x_offset: 0,
            min_y_offset: 0,
            ping_interval: 5,
            pings: 1,
        }
    }
}

/// Storefront identity fields. Absent values stay `None` all the way to the SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontInstance {
    pub environment_id: Option<String>,
    pub environment: Option<String>,
    pub store_url: Option<String>,
    pub website_id: Option<i64>,
    pub website_code: Option<String>,
    pub store_id: Option<i64>,
    pub store_code: Option<String>,
    pub store_view_id: Option<i64>,
    pub store_view_code: Option<String>,
    pub website_name: Option<String>,
    pub store_name: Option<String>,
    pub store_view_name: Option<String>,
    pub base_currency_code: Option<String>,
    pub store_view_currency_code: Option<String>,
    pub catalog_extension_version: Option<String>,
}

impl StorefrontInstance {
    /// `base_currency_code` comes from `storeConfig`; everything else from the
    /// instance context.
    #[must_use]
    pub fn new(context: &StoreContext, store_config: Option<&StoreConfig>) -> Self {
        Self {
            environment_id: context.environment_id.clone(),
            environment: context.environment.clone(),
            store_url: context.store_url.clone(),
            website_id: context.website_id,
            website_code: context.website_code.clone(),
            store_id: context.store_id,
            store_code: context.store_code.clone(),
            store_view_id: context.store_view_id,
            store_view_code: context.store_view_code.clone(),
            website_name: context.website_name.clone(),
            store_name: context.store_name.clone(),
            store_view_name: context.store_view_name.clone(),
            base_currency_code: store_config.and_then(|c| c.base_currency_code.clone()),
            store_view_currency_code: context.store_view_currency_code.clone(),
            catalog_extension_version: context.catalog_extension_version.clone(),
        }
    }

    /// JSON rendering for logs, with [`MISSING_FIELD`] in place of every
    /// absent value.
    #[must_use]
    pub fn log_view(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(fields) = value.as_object_mut() {
            for field in fields.values_mut().filter(|v| v.is_null()) {
                *field = serde_json::Value::String(MISSING_FIELD.to_owned());
            }
        }
        value
    }
}
