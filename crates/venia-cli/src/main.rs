mod console;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use venia_core::AppConfig;
use venia_graphql::GraphqlClient;
use venia_storefront::bootstrap::SEARCH_FORM_ID;
use venia_storefront::store_config::{store_paths, BODY_STORE_ROOT_URL, STORE_CONFIG_META};
use venia_storefront::{
    Bootstrap, BootstrapSettings, Globals, MemoryDocument, MemorySessionStore, SessionStore,
    WishlistBridge, STOREFRONT_CONTEXT_SESSION_KEY,
};

use crate::console::{ConsoleLiveSearch, ConsoleStorefrontEvents};

#[derive(Debug, Parser)]
#[command(name = "venia-cli")]
#[command(about = "Venia storefront bootstrap command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the storefront bootstrap against the configured GraphQL endpoint.
    Bootstrap {
        /// JSON content of the page's `store-config` meta tag.
        #[arg(long)]
        store_config: Option<String>,
        /// Treat the widget and events SDK as already present on the page.
        #[arg(long)]
        preloaded: bool,
    },
    /// Print the account page paths derived from the store root URL.
    Paths {
        /// JSON content of the page's `store-config` meta tag.
        #[arg(long, conflicts_with = "body_root_url")]
        store_config: Option<String>,
        /// Deprecated `data-store-root-url` body attribute.
        #[arg(long)]
        body_root_url: Option<String>,
    },
    /// Forward an add-to-wishlist event detail to the GraphQL endpoint.
    Wishlist {
        /// Event detail: a JSON array of items, or a string containing one.
        #[arg(long)]
        detail: String,
        #[arg(long, default_value = venia_storefront::wishlist::DEFAULT_WISHLIST_ID)]
        wishlist_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Paths {
            store_config,
            body_root_url,
        } => {
            init_tracing("info")?;
            run_paths(store_config.as_deref(), body_root_url.as_deref())
        }
        Commands::Bootstrap {
            store_config,
            preloaded,
        } => {
            let config = venia_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            tracing::debug!(?config, "configuration loaded");
            run_bootstrap(&config, store_config.as_deref(), preloaded).await
        }
        Commands::Wishlist {
            detail,
            wishlist_id,
        } => {
            let config = venia_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            run_wishlist(&config, &detail, &wishlist_id).await
        }
    }
}

fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

fn run_paths(store_config: Option<&str>, body_root_url: Option<&str>) -> anyhow::Result<()> {
    let mut document = MemoryDocument::new();
    if let Some(content) = store_config {
        document = document.with_meta(STORE_CONFIG_META, content);
    }
    if let Some(root) = body_root_url {
        document = document.with_body_data(BODY_STORE_ROOT_URL, root);
    }

    let paths = store_paths(&document)?;
    println!("{}", serde_json::to_string_pretty(&paths)?);
    Ok(())
}

async fn run_bootstrap(
    config: &AppConfig,
    store_config: Option<&str>,
    preloaded: bool,
) -> anyhow::Result<()> {
    let client = GraphqlClient::from_config(config)?;
    let globals = Globals::new();
    let live_search = Arc::new(ConsoleLiveSearch);
    let events = Arc::new(ConsoleStorefrontEvents);

    let mut document = MemoryDocument::new().with_form(SEARCH_FORM_ID);
    if let Some(content) = store_config {
        document = document.with_meta(STORE_CONFIG_META, content);
    }
    if preloaded {
        globals.live_search().define(live_search);
        globals.storefront_events().define(events);
    } else {
        // Stand-in for the browser evaluating the injected script, which
        // brings the events SDK along with the widget.
        let loaded = globals.clone();
        document = document.with_script_loader(move |src| {
            tracing::info!(src, "script loaded");
            loaded.live_search().define(live_search.clone());
            loaded.storefront_events().define(events.clone());
        });
    }

    let document = Arc::new(document);
    let session = Arc::new(MemorySessionStore::new());
    let mut bootstrap = Bootstrap::new(
        client,
        document.clone(),
        session.clone(),
        globals,
        BootstrapSettings::from_config(config),
    );

    let outcome = bootstrap.run().await;
    let summary = serde_json::json!({
        "outcome": format!("{outcome:?}"),
        "scriptsInjected": document.scripts(),
        "searchFormAction": document.form_action(SEARCH_FORM_ID),
        "sessionStorage": {
            STOREFRONT_CONTEXT_SESSION_KEY: session.get_item(STOREFRONT_CONTEXT_SESSION_KEY),
        },
        "extensionVersion": bootstrap.state().extension_version,
        "storeConfig": bootstrap.state().store_config,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn run_wishlist(config: &AppConfig, detail: &str, wishlist_id: &str) -> anyhow::Result<()> {
    let client = GraphqlClient::from_config(config)?;
    let bridge = WishlistBridge::new(client).with_wishlist_id(wishlist_id);

    // Accept either a bare JSON array or an opaque string detail.
    let detail = serde_json::from_str::<serde_json::Value>(detail)
        .unwrap_or_else(|_| serde_json::Value::String(detail.to_owned()));
    let report = bridge.handle_event(&detail).await?;

    println!(
        "{}",
        serde_json::json!({
            "accepted": report.accepted,
            "invalid": report.invalid,
            "rejected": report.rejected,
            "failed": report.failed,
        })
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_bootstrap_flags() {
        let cli = Cli::try_parse_from([
            "venia-cli",
            "bootstrap",
            "--store-config",
            r#"{"storeRootUrl":"/content/venia/us/en.html"}"#,
            "--preloaded",
        ])
        .expect("should parse");
        assert!(matches!(
            cli.command,
            Commands::Bootstrap { preloaded: true, store_config: Some(_) }
        ));
    }

    #[test]
    fn wishlist_id_defaults_to_zero() {
        let cli = Cli::try_parse_from(["venia-cli", "wishlist", "--detail", "[]"])
            .expect("should parse");
        match cli.command {
            Commands::Wishlist { wishlist_id, .. } => assert_eq!(wishlist_id, "0"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn paths_rejects_both_sources() {
        let result = Cli::try_parse_from([
            "venia-cli",
            "paths",
            "--store-config",
            "{}",
            "--body-root-url",
            "/us/en.html",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn run_paths_accepts_body_fallback() {
        run_paths(None, Some("/content/venia/us/en.html")).expect("fallback should work");
        assert!(run_paths(None, None).is_err());
    }
}
