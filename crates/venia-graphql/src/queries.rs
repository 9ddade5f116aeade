//! Literal GraphQL documents sent by the storefront bootstrap and the
//! wishlist bridge.

/// Storefront instance identity plus the `storeConfig` currency/store code.
pub const STOREFRONT_INSTANCE_CONTEXT: &str = r"
  query DataServicesStorefrontInstanceContext {
    dataServicesStorefrontInstanceContext {
      customer_group
      environment_id
      environment
      store_id
      store_view_id
      store_code
      store_view_code
      website_code
      store_url
      api_key
      websiteId
      website_name
      store_name
      store_view_name
      base_currency_code
      store_view_currency_code
    }
    storeConfig {
      base_currency_code
      store_code
    }
  }
";

/// Installed commerce extension version.
pub const MAGENTO_EXTENSION_CONTEXT: &str = r"
  query DataServicesMagentoExtensionContext {
    dataServicesMagentoExtensionContext {
      magento_extension_version
    }
  }
";

pub const ADD_PRODUCT_TO_WISHLIST: &str = r"
  mutation AddProductToWishlist($wishlistId: ID!, $itemOptions: WishlistItemInput!) {
    addProductsToWishlist(wishlistId: $wishlistId, wishlistItems: [$itemOptions]) {
      user_errors {
        code
        message
      }
    }
  }
";
