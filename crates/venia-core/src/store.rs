//! Store identity snapshots obtained from the storefront GraphQL endpoint.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Identity of the storefront instance, as returned by
/// `dataServicesStorefrontInstanceContext`.
///
/// Every field is optional on the wire, and a field of an unexpected type
/// reads as `None` instead of failing the whole context. The JSON object the
/// server sent is kept alongside the typed fields so it can be republished
/// unchanged to widgets that read it from session storage.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreContext {
    #[serde(deserialize_with = "lenient")]
    pub customer_group: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub environment_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub environment: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub store_id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub store_view_id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub store_code: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub store_view_code: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub website_code: Option<String>,
    /// Store base URL, including its trailing slash, e.g. `"https://venia.example.com/"`.
    #[serde(deserialize_with = "lenient")]
    pub store_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub api_key: Option<String>,
    /// Read from `website_id`, or from `websiteId` when that is absent.
    #[serde(deserialize_with = "lenient")]
    pub website_id: Option<i64>,
    #[serde(rename = "websiteId", deserialize_with = "lenient")]
    website_id_camel: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub website_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub store_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub store_view_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub base_currency_code: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub store_view_currency_code: Option<String>,
    /// Not part of the bootstrap query; present only if a backend adds it.
    #[serde(deserialize_with = "lenient")]
    pub catalog_extension_version: Option<String>,
    #[serde(skip)]
    raw: serde_json::Value,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

impl StoreContext {
    /// Reads the typed fields from the context object, retaining the raw JSON.
    ///
    /// Never fails: a value that is not an object yields no typed fields but
    /// is still kept as the raw context.
    #[must_use]
    pub fn from_json(value: serde_json::Value) -> Self {
        let mut context = if value.is_object() {
            Self::deserialize(&value).unwrap_or_default()
        } else {
            Self::default()
        };
        context.website_id = context.website_id.or(context.website_id_camel.take());
        context.raw = value;
        context
    }

    /// The context object exactly as the server returned it.
    #[must_use]
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    /// Serializes the raw context object for publication in session storage.
    ///
    /// Keys keep the order the server sent them in.
    #[must_use]
    pub fn to_session_json(&self) -> String {
        self.raw.to_string()
    }
}

/// The `storeConfig` selection fetched together with the instance context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default, alias = "baseCurrencyCode")]
    pub base_currency_code: Option<String>,
    #[serde(default, alias = "storeCode")]
    pub store_code: Option<String>,
}

/// Installed commerce extension version, used only as an analytics label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionVersion(pub String);

impl ExtensionVersion {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExtensionVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn from_json_reads_typed_fields_and_keeps_raw() {
        let value = json!({
            "environment_id": "env-1",
            "store_code": "main_website_store",
            "store_id": 1,
            "websiteId": 1,
            "store_url": "https://venia.example.com/",
            "api_key": null
        });
        let ctx = StoreContext::from_json(value.clone());
        assert_eq!(ctx.environment_id.as_deref(), Some("env-1"));
        assert_eq!(ctx.store_id, Some(1));
        assert_eq!(ctx.website_id, Some(1));
        assert_eq!(ctx.api_key, None);
        assert_eq!(ctx.customer_group, None);
        assert_eq!(ctx.raw(), &value);
        assert_eq!(ctx.to_session_json(), value.to_string());
    }

    #[test]
    fn from_json_keeps_non_object_as_raw() {
        let ctx = StoreContext::from_json(json!("nope"));
        assert_eq!(ctx.store_code, None);
        assert_eq!(ctx.to_session_json(), r#""nope""#);
    }

    #[test]
    fn mistyped_field_reads_as_none_and_keeps_the_rest() {
        let value = json!({
            "environment_id": "env",
            "store_code": "main",
            "store_id": "1",
            "store_view_id": 2
        });
        let ctx = StoreContext::from_json(value.clone());
        assert_eq!(ctx.store_id, None);
        assert_eq!(ctx.store_view_id, Some(2));
        assert_eq!(ctx.store_code.as_deref(), Some("main"));
        assert_eq!(ctx.raw(), &value);
    }

    #[test]
    fn both_website_id_spellings_prefer_snake_case() {
        let ctx = StoreContext::from_json(json!({ "website_id": 2, "websiteId": 1 }));
        assert_eq!(ctx.website_id, Some(2));

        let ctx = StoreContext::from_json(json!({ "website_id": null, "websiteId": 1 }));
        assert_eq!(ctx.website_id, Some(1));
    }

    #[test]
    fn session_json_keeps_server_key_order() {
        let raw = r#"{"store_url":"https://v.example/","environment_id":"env","api_key":"k"}"#;
        let ctx = StoreContext::from_json(serde_json::from_str(raw).unwrap());
        assert_eq!(ctx.to_session_json(), raw);
    }

    #[test]
    fn store_config_accepts_both_spellings() {
        let snake: StoreConfig =
            serde_json::from_value(json!({"base_currency_code": "USD", "store_code": "default"}))
                .unwrap();
        let camel: StoreConfig =
            serde_json::from_value(json!({"baseCurrencyCode": "USD", "storeCode": "default"}))
                .unwrap();
        assert_eq!(snake, camel);
        assert_eq!(snake.base_currency_code.as_deref(), Some("USD"));
    }
}
