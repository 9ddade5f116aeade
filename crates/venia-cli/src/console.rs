//! Stand-ins for the page's external scripts that log what they receive.

use venia_storefront::{
    LiveSearchConfig, LiveSearchFactory, MagentoExtension, PageContext, StorefrontEvents,
    StorefrontInstance,
};

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}

pub struct ConsoleLiveSearch;

impl LiveSearchFactory for ConsoleLiveSearch {
    fn instantiate(&self, config: LiveSearchConfig) {
        tracing::info!(config = %to_json(&config), "LiveSearchAutocomplete instantiated");
    }
}

pub struct ConsoleStorefrontEvents;

impl StorefrontEvents for ConsoleStorefrontEvents {
    fn set_magento_extension(&self, extension: MagentoExtension) {
        tracing::info!(payload = %to_json(&extension), "context.setMagentoExtension");
    }

    fn set_page(&self, page: PageContext) {
        tracing::info!(payload = %to_json(&page), "context.setPage");
    }

    fn set_storefront_instance(&self, instance: StorefrontInstance) {
        tracing::info!(payload = %to_json(&instance), "context.setStorefrontInstance");
    }
}
