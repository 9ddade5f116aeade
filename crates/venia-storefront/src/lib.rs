pub mod analytics;
pub mod bootstrap;
pub mod error;
pub mod globals;
pub mod page;
pub mod store_config;
pub mod widget;
pub mod wishlist;

pub use analytics::{MagentoExtension, PageContext, StorefrontEvents, StorefrontInstance};
pub use bootstrap::{
    Bootstrap, BootstrapOutcome, BootstrapSettings, BootstrapState, WaitFailure,
    STOREFRONT_CONTEXT_SESSION_KEY,
};
pub use error::{BootstrapError, WishlistError};
pub use globals::{Globals, Slot, Teardown};
pub use page::{Document, MemoryDocument, MemorySessionStore, SessionStore};
pub use widget::{LiveSearchConfig, LiveSearchFactory};
pub use wishlist::{WishlistBridge, WishlistReport};
