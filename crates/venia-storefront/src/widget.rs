//! Live-search autocomplete widget configuration.

use serde::Serialize;
use venia_core::{StoreConfigMetadata, StoreContext};

/// Constructor exposed by the live-search script as `window.LiveSearchAutocomplete`.
pub trait LiveSearchFactory: Send + Sync {
    fn instantiate(&self, config: LiveSearchConfig);
}

/// Search behaviour settings. These are fixed for every storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSearchSettings {
    pub page_size: u32,
    pub min_query_length: String,
    pub currency_symbol: String,
    pub currency_rate: String,
    pub display_out_of_stock: bool,
    pub allow_all_products: bool,
}

impl Default for LiveSearchSettings {
    fn default() -> Self {
        Self {
            page_size: 8,
            min_query_length: "2".to_owned(),
            currency_symbol: "$".to_owned(),
            currency_rate: "1".to_owned(),
            display_out_of_stock: true,
            allow_all_products: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopperContext {
    pub customer_group: Option<String>,
}

/// Maps a product SKU to its storefront redirect page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRoute {
    redirect_url: String,
}

impl ProductRoute {
    #[must_use]
    pub fn new(redirect_url: &str) -> Self {
        Self {
            redirect_url: redirect_url.to_owned(),
        }
    }

    #[must_use]
    pub fn url_for(&self, sku: &str) -> String {
        format!("{}.cifproductredirect.html/{sku}", self.redirect_url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRoute {
    pub route: String,
    pub query: String,
}

/// Everything the widget constructor receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSearchConfig {
    pub environment_id: Option<String>,
    pub website_code: Option<String>,
    pub store_code: Option<String>,
    pub store_view_code: Option<String>,
    pub config: LiveSearchSettings,
    pub context: ShopperContext,
    pub route: ProductRoute,
    pub search_route: SearchRoute,
}

impl LiveSearchConfig {
    #[must_use]
    pub fn new(context: &StoreContext, metadata: &StoreConfigMetadata) -> Self {
        let redirect_url = metadata.redirect_url();
        Self {
            environment_id: context.environment_id.clone(),
            website_code: context.website_code.clone(),
            store_code: context.store_code.clone(),
            store_view_code: context.store_view_code.clone(),
            config: LiveSearchSettings::default(),
            context: ShopperContext {
                customer_group: context.customer_group.clone(),
            },
            route: ProductRoute::new(redirect_url),
            search_route: SearchRoute {
                route: format!("{redirect_url}/search.html"),
                query: "search_query".to_owned(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn metadata() -> StoreConfigMetadata {
        StoreConfigMetadata::parse(r#"{"storeRootUrl":"/content/venia/us/en.html"}"#).unwrap()
    }

    #[test]
    fn settings_serialize_to_widget_shape() {
        let value = serde_json::to_value(LiveSearchSettings::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "pageSize": 8,
                "minQueryLength": "2",
                "currencySymbol": "$",
                "currencyRate": "1",
                "displayOutOfStock": true,
                "allowAllProducts": false
            })
        );
    }

    #[test]
    fn routes_derive_from_redirect_url() {
        let ctx = StoreContext::from_json(json!({ "store_code": "main" }));
        let config = LiveSearchConfig::new(&ctx, &metadata());
        assert_eq!(
            config.route.url_for("VA11"),
            "/content/venia/us/en.cifproductredirect.html/VA11"
        );
        assert_eq!(config.search_route.route, "/content/venia/us/en/search.html");
        assert_eq!(config.search_route.query, "search_query");
        assert_eq!(config.store_code.as_deref(), Some("main"));
        assert_eq!(config.environment_id, None);
    }
}
