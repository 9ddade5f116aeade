use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Default location of the live-search autocomplete script.
pub const DEFAULT_LIVE_SEARCH_SCRIPT_URL: &str =
    "https://searchautocompleteqa.magento-datasolutions.com/v0/LiveSearchAutocomplete.js";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Storefront origin the GraphQL path is resolved against, e.g. `"https://venia.example.com"`.
    pub storefront_url: String,
    pub env: Environment,
    pub log_level: String,
    pub graphql_path: String,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub live_search_script_url: String,
    /// `None` waits for the widget global without a deadline.
    pub widget_wait_timeout: Option<Duration>,
    /// `None` waits for the analytics global without a deadline.
    pub analytics_wait_timeout: Option<Duration>,
}

impl AppConfig {
    /// Full GraphQL endpoint URL: storefront origin joined with the GraphQL path.
    #[must_use]
    pub fn graphql_endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.storefront_url.trim_end_matches('/'),
            self.graphql_path.trim_start_matches('/')
        )
    }
}
