//! Bridges the page's `aem.cif.add-to-wishlist` event to the wishlist mutation.

use venia_graphql::{GraphqlClient, WishlistItemInput};

use crate::error::WishlistError;

pub const ADD_TO_WISHLIST_EVENT: &str = "aem.cif.add-to-wishlist";

/// Wishlist the page events target; the backend resolves `"0"` to the
/// shopper's default wishlist.
pub const DEFAULT_WISHLIST_ID: &str = "0";

/// Parses an event `detail`, which pages send either as a JSON array or as a
/// string containing one.
///
/// Each element is parsed on its own, so one malformed item does not hide the
/// others.
///
/// # Errors
///
/// - [`WishlistError::InvalidDetail`] if a string detail is not valid JSON.
/// - [`WishlistError::NotAnArray`] if the detail is not an array.
pub fn parse_event_detail(
    detail: &serde_json::Value,
) -> Result<Vec<Result<WishlistItemInput, serde_json::Error>>, WishlistError> {
    let items = match detail {
        serde_json::Value::String(raw) => serde_json::from_str::<serde_json::Value>(raw)?,
        other => other.clone(),
    };
    match items {
        serde_json::Value::Array(items) => {
            Ok(items.into_iter().map(serde_json::from_value).collect())
        }
        other => Err(WishlistError::NotAnArray(json_kind(&other))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Per-event tally of what happened to each item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishlistReport {
    pub accepted: usize,
    /// Elements of the detail that are not wishlist items; never sent.
    pub invalid: usize,
    /// Items the backend refused with `user_errors`.
    pub rejected: usize,
    /// Items whose mutation failed outright.
    pub failed: usize,
}

pub struct WishlistBridge {
    client: GraphqlClient,
    wishlist_id: String,
}

impl WishlistBridge {
    #[must_use]
    pub fn new(client: GraphqlClient) -> Self {
        Self {
            client,
            wishlist_id: DEFAULT_WISHLIST_ID.to_owned(),
        }
    }

    #[must_use]
    pub fn with_wishlist_id(mut self, wishlist_id: &str) -> Self {
        self.wishlist_id = wishlist_id.to_owned();
        self
    }

    /// Sends one mutation per item in the event. A failing item is logged and
    /// does not stop the rest.
    ///
    /// # Errors
    ///
    /// Returns an error only if the event detail as a whole cannot be parsed.
    pub async fn handle_event(
        &self,
        detail: &serde_json::Value,
    ) -> Result<WishlistReport, WishlistError> {
        let items = parse_event_detail(detail)?;
        tracing::info!(
            items = items.len(),
            event = ADD_TO_WISHLIST_EVENT,
            "wishlist event received"
        );

        let mut report = WishlistReport::default();
        for (index, item) in items.iter().enumerate() {
            let item = match item {
                Ok(item) => item,
                Err(err) => {
                    tracing::warn!(index, error = %err, "skipping malformed wishlist item");
                    report.invalid += 1;
                    continue;
                }
            };
            match self.add_item(item).await {
                Ok(true) => report.accepted += 1,
                Ok(false) => report.rejected += 1,
                Err(err) => {
                    tracing::warn!(error = %err, "wishlist item not added");
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }

    /// Returns `Ok(false)` when the backend answered with `user_errors`.
    async fn add_item(&self, item: &WishlistItemInput) -> Result<bool, WishlistError> {
        let user_errors = self
            .client
            .add_product_to_wishlist(&self.wishlist_id, item)
            .await
            .map_err(|source| WishlistError::Mutation {
                sku: item.sku.clone(),
                source,
            })?;

        for user_error in &user_errors {
            tracing::warn!(
                sku = %item.sku,
                code = %user_error.code,
                message = %user_error.message,
                "wishlist rejected item"
            );
        }
        Ok(user_errors.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_array_detail() {
        let items = parse_event_detail(&json!([
            { "sku": "VA11", "quantity": 2 },
            { "sku": "VSW01", "parent_sku": "VSW", "selected_options": ["Y29uZmlndXJhYmxlLzE="] }
        ]))
        .unwrap()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
        assert_eq!(items.len(), 2);
        assert!((items[0].quantity - 2.0).abs() < f64::EPSILON);
        assert!((items[1].quantity - 1.0).abs() < f64::EPSILON);
        assert_eq!(items[1].parent_sku.as_deref(), Some("VSW"));
    }

    #[test]
    fn parses_string_detail() {
        let detail = json!(r#"[{"sku":"VA11","quantity":1}]"#);
        let items = parse_event_detail(&detail).unwrap();
        assert_eq!(items[0].as_ref().unwrap().sku, "VA11");
    }

    #[test]
    fn rejects_object_detail() {
        let err = parse_event_detail(&json!({ "sku": "VA11" })).unwrap_err();
        assert!(matches!(err, WishlistError::NotAnArray("an object")));
    }

    #[test]
    fn rejects_malformed_string_detail() {
        let err = parse_event_detail(&json!("[{\"sku\":")).unwrap_err();
        assert!(matches!(err, WishlistError::InvalidDetail(_)));
    }

    #[test]
    fn item_without_sku_fails_alone() {
        let items =
            parse_event_detail(&json!([{ "sku": "VA11" }, { "quantity": 1 }, { "sku": "VA12" }]))
                .unwrap();
        assert_eq!(items.len(), 3);
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
        assert_eq!(items[2].as_ref().unwrap().sku, "VA12");
    }
}
