//! Reads the page's store configuration.

use venia_core::{MetadataError, StoreConfigMetadata, StorePaths};

use crate::page::Document;

pub const STORE_CONFIG_META: &str = "store-config";

/// Deprecated `<body data-store-root-url>` attribute, read only when the meta tag is absent.
pub const BODY_STORE_ROOT_URL: &str = "storeRootUrl";

/// Parses `meta[name="store-config"]`.
///
/// # Errors
///
/// - [`MetadataError::Missing`] if the page has no such meta tag.
/// - [`MetadataError::InvalidJson`] / [`MetadataError::MissingStoreRootUrl`]
///   if its content is malformed.
pub fn read_store_config(document: &dyn Document) -> Result<StoreConfigMetadata, MetadataError> {
    let content = document
        .meta_content(STORE_CONFIG_META)
        .ok_or(MetadataError::Missing)?;
    StoreConfigMetadata::parse(&content)
}

/// Derives the account page paths from the store root URL.
///
/// # Errors
///
/// Returns [`MetadataError::Missing`] if neither the meta tag nor the body
/// attribute is present, or a parse error if the meta tag is malformed.
pub fn store_paths(document: &dyn Document) -> Result<StorePaths, MetadataError> {
    let root = match read_store_config(document) {
        Ok(metadata) => metadata.store_root_url,
        Err(MetadataError::Missing) => {
            tracing::warn!(
                "store-config meta tag missing, falling back to deprecated body data attribute"
            );
            document
                .body_data(BODY_STORE_ROOT_URL)
                .ok_or(MetadataError::Missing)?
        }
        Err(err) => return Err(err),
    };
    Ok(StorePaths::from_store_root_url(&root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemoryDocument;

    #[test]
    fn meta_tag_wins_over_body_attribute() {
        let doc = MemoryDocument::new()
            .with_meta(STORE_CONFIG_META, r#"{"storeRootUrl":"/content/venia/us/en.html"}"#)
            .with_body_data(BODY_STORE_ROOT_URL, "/content/legacy/de.html");
        let paths = store_paths(&doc).unwrap();
        assert_eq!(paths.base_path, "/content/venia/us/en");
    }

    #[test]
    fn body_attribute_is_the_fallback() {
        let doc =
            MemoryDocument::new().with_body_data(BODY_STORE_ROOT_URL, "/content/legacy/de.html");
        let paths = store_paths(&doc).unwrap();
        assert_eq!(paths.reset_password, "/content/legacy/de/reset-password.html");
    }

    #[test]
    fn malformed_meta_does_not_fall_back() {
        let doc = MemoryDocument::new()
            .with_meta(STORE_CONFIG_META, "not json")
            .with_body_data(BODY_STORE_ROOT_URL, "/content/legacy/de.html");
        assert!(matches!(
            store_paths(&doc),
            Err(MetadataError::InvalidJson(_))
        ));
    }

    #[test]
    fn nothing_on_page_is_missing() {
        let doc = MemoryDocument::new();
        assert!(matches!(read_store_config(&doc), Err(MetadataError::Missing)));
        assert!(matches!(store_paths(&doc), Err(MetadataError::Missing)));
    }
}
