pub mod client;
pub mod error;
pub mod queries;
pub mod types;

pub use client::GraphqlClient;
pub use error::GraphqlError;
pub use types::{EnteredOption, StorefrontContext, WishlistItemInput, WishlistUserError};
