//! Page-level store configuration published by the AEM page in
//! `<meta name="store-config" content="{...}">`.

use serde::{Deserialize, Serialize};

use crate::MetadataError;

/// Parsed content of the `store-config` meta tag.
///
/// Only `storeRootUrl` is required; every other key is preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfigMetadata {
    /// Root page of the store, e.g. `"/content/venia/us/en.html"`.
    #[serde(rename = "storeRootUrl")]
    pub store_root_url: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StoreConfigMetadata {
    /// Parses the meta tag's `content` attribute.
    ///
    /// # Errors
    ///
    /// - [`MetadataError::InvalidJson`] if `content` is not a JSON object.
    /// - [`MetadataError::MissingStoreRootUrl`] if `storeRootUrl` is absent
    ///   or not a string.
    pub fn parse(content: &str) -> Result<Self, MetadataError> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        if !value
            .get("storeRootUrl")
            .is_some_and(serde_json::Value::is_string)
        {
            return Err(MetadataError::MissingStoreRootUrl);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Store root URL without its `.html` suffix; product and search routes
    /// are built from this prefix.
    #[must_use]
    pub fn redirect_url(&self) -> &str {
        self.store_root_url
            .split(".html")
            .next()
            .unwrap_or(&self.store_root_url)
    }
}

/// Page paths derived from the store root URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorePaths {
    pub base_url: String,
    /// Root URL truncated before its first `.`, e.g. `"/content/venia/us/en"`.
    /// Empty when the root URL has no `.`.
    pub base_path: String,
    pub address_book: String,
    pub account_details: String,
    pub reset_password: String,
}

impl StorePaths {
    #[must_use]
    pub fn from_store_root_url(base_url: &str) -> Self {
        let base_path = base_url
            .find('.')
            .map_or("", |idx| &base_url[..idx])
            .to_string();
        Self {
            base_url: base_url.to_string(),
            address_book: format!("{base_path}/my-account/address-book.html"),
            account_details: format!("{base_path}/my-account/account-details.html"),
            reset_password: format!("{base_path}/reset-password.html"),
            base_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_extra_keys() {
        let meta = StoreConfigMetadata::parse(
            r#"{"storeView":"default","storeRootUrl":"/content/venia/us/en.html","graphqlEndpoint":"/api/graphql"}"#,
        )
        .unwrap();
        assert_eq!(meta.store_root_url, "/content/venia/us/en.html");
        assert_eq!(
            meta.extra.get("storeView").and_then(|v| v.as_str()),
            Some("default")
        );
        assert_eq!(meta.extra.len(), 2);
    }

    #[test]
    fn parse_rejects_missing_root_url() {
        let err = StoreConfigMetadata::parse(r#"{"storeView":"default"}"#).unwrap_err();
        assert!(matches!(err, MetadataError::MissingStoreRootUrl));
    }

    #[test]
    fn parse_rejects_invalid_json() {
        let err = StoreConfigMetadata::parse("{storeRootUrl:").unwrap_err();
        assert!(matches!(err, MetadataError::InvalidJson(_)));
    }

    #[test]
    fn redirect_url_strips_html_suffix() {
        let meta = StoreConfigMetadata::parse(r#"{"storeRootUrl":"/content/venia/us/en.html"}"#)
            .unwrap();
        assert_eq!(meta.redirect_url(), "/content/venia/us/en");
    }

    #[test]
    fn redirect_url_without_suffix_is_unchanged() {
        let meta = StoreConfigMetadata::parse(r#"{"storeRootUrl":"/us/en"}"#).unwrap();
        assert_eq!(meta.redirect_url(), "/us/en");
    }

    #[test]
    fn store_paths_truncate_at_first_dot() {
        let paths = StorePaths::from_store_root_url("/content/venia/us/en.html");
        assert_eq!(paths.base_path, "/content/venia/us/en");
        assert_eq!(
            paths.address_book,
            "/content/venia/us/en/my-account/address-book.html"
        );
        assert_eq!(
            paths.account_details,
            "/content/venia/us/en/my-account/account-details.html"
        );
        assert_eq!(paths.reset_password, "/content/venia/us/en/reset-password.html");
        assert_eq!(paths.base_url, "/content/venia/us/en.html");
    }

    #[test]
    fn store_paths_without_dot_have_empty_base_path() {
        let paths = StorePaths::from_store_root_url("/content/venia/us/en");
        assert_eq!(paths.base_path, "");
        assert_eq!(paths.address_book, "/my-account/address-book.html");
        assert_eq!(paths.base_url, "/content/venia/us/en");
    }
}
