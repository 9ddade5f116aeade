//! Storefront bootstrap: store context → live-search widget → analytics.
//!
//! The sequence only moves forward. Both GraphQL queries run concurrently and
//! are joined; the widget script is then loaded if needed, the widget is
//! instantiated, and finally the storefront events SDK is configured. Every
//! step is best-effort: a failure is logged and only the steps that depend on
//! it are skipped.

use std::sync::Arc;
use std::time::Duration;

use venia_core::app_config::DEFAULT_LIVE_SEARCH_SCRIPT_URL;
use venia_core::{AppConfig, ExtensionVersion, StoreConfig, StoreContext};
use venia_graphql::{GraphqlClient, StorefrontContext};

use crate::analytics::{MagentoExtension, PageContext, StorefrontInstance};
use crate::error::BootstrapError;
use crate::globals::{Globals, Teardown, LIVE_SEARCH_GLOBAL};
use crate::page::{Document, SessionStore};
use crate::store_config::read_store_config;
use crate::widget::LiveSearchConfig;

/// Session-storage key the live-search widget reads the instance context from.
pub const STOREFRONT_CONTEXT_SESSION_KEY: &str = "WIDGET_STOREFRONT_INSTANCE_CONTEXT";

pub const SEARCH_FORM_ID: &str = "search_mini_form";

#[derive(Debug, Clone)]
pub struct BootstrapSettings {
    pub live_search_script_url: String,
    /// `None` waits for the widget global without a deadline.
    pub widget_wait_timeout: Option<Duration>,
    /// `None` waits for the analytics global without a deadline.
    pub analytics_wait_timeout: Option<Duration>,
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            live_search_script_url: DEFAULT_LIVE_SEARCH_SCRIPT_URL.to_owned(),
            widget_wait_timeout: Some(Duration::from_secs(30)),
            analytics_wait_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl BootstrapSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            live_search_script_url: config.live_search_script_url.clone(),
            widget_wait_timeout: config.widget_wait_timeout,
            analytics_wait_timeout: config.analytics_wait_timeout,
        }
    }
}

/// Data gathered during one bootstrap. Each field is written at most once.
#[derive(Debug, Clone, Default)]
pub struct BootstrapState {
    pub store_context: Option<StoreContext>,
    pub extension_version: Option<ExtensionVersion>,
    pub store_config: Option<StoreConfig>,
}

/// Why a wait for an external global ended without it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitFailure {
    TimedOut,
    TornDown,
    /// Activation was attempted while the global was still undefined.
    Undefined,
}

/// How far a bootstrap got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Widget instantiated and analytics configured.
    Completed,
    /// The widget global never became available.
    WidgetNotLoaded(WaitFailure),
    /// No storefront instance context; widget and analytics skipped.
    ContextMissing,
    /// Store-config metadata missing or malformed; widget and analytics skipped.
    StoreConfigUnavailable,
    /// Widget instantiated, but the events SDK never defined its global.
    AnalyticsNotLoaded(WaitFailure),
}

impl BootstrapOutcome {
    fn from_wait(err: &BootstrapError, on_wait: fn(WaitFailure) -> Self) -> Self {
        match err {
            BootstrapError::WaitTimedOut { .. } => on_wait(WaitFailure::TimedOut),
            BootstrapError::TornDown { .. } => on_wait(WaitFailure::TornDown),
            BootstrapError::NotDefined { .. } => on_wait(WaitFailure::Undefined),
            BootstrapError::Metadata(_) => Self::StoreConfigUnavailable,
        }
    }
}

/// One bootstrap per page load.
pub struct Bootstrap {
    client: GraphqlClient,
    document: Arc<dyn Document>,
    session: Arc<dyn SessionStore>,
    globals: Globals,
    teardown: Teardown,
    settings: BootstrapSettings,
    state: BootstrapState,
}

impl Bootstrap {
    #[must_use]
    pub fn new(
        client: GraphqlClient,
        document: Arc<dyn Document>,
        session: Arc<dyn SessionStore>,
        globals: Globals,
        settings: BootstrapSettings,
    ) -> Self {
        Self {
            client,
            document,
            session,
            globals,
            teardown: Teardown::new(),
            settings,
            state: BootstrapState::default(),
        }
    }

    /// Ties every wait to an externally owned teardown signal.
    #[must_use]
    pub fn with_teardown(mut self, teardown: Teardown) -> Self {
        self.teardown = teardown;
        self
    }

    #[must_use]
    pub fn state(&self) -> &BootstrapState {
        &self.state
    }

    /// Runs the full sequence once.
    pub async fn run(&mut self) -> BootstrapOutcome {
        let (storefront, extension_version) =
            tokio::join!(self.fetch_store_context(), self.fetch_extension_version());

        if let Some(storefront) = storefront {
            self.state.store_context = storefront.instance;
            self.state.store_config = storefront.store_config;
        }
        self.state.extension_version = extension_version;

        if let Err(err) = self.ensure_external_widget_loaded().await {
            tracing::warn!(error = %err, "live-search widget not loaded; skipping activation");
            return BootstrapOutcome::from_wait(&err, BootstrapOutcome::WidgetNotLoaded);
        }

        let Some(context) = self.state.store_context.clone() else {
            tracing::info!("no dataServicesStorefrontInstanceContext");
            return BootstrapOutcome::ContextMissing;
        };

        if let Err(err) = self.activate_widget(&context) {
            tracing::warn!(error = %err, "live-search widget activation skipped");
            return BootstrapOutcome::from_wait(&err, BootstrapOutcome::WidgetNotLoaded);
        }

        let extension_version = self.state.extension_version.clone();
        let store_config = self.state.store_config.clone();
        if let Err(err) = self
            .activate_analytics_bridge(
                &context,
                extension_version.as_ref(),
                store_config.as_ref(),
            )
            .await
        {
            tracing::warn!(error = %err, "storefront events not configured");
            return BootstrapOutcome::from_wait(&err, BootstrapOutcome::AnalyticsNotLoaded);
        }

        BootstrapOutcome::Completed
    }

    /// Fetches the storefront instance context and store config.
    ///
    /// Returns `None` if the request or its parsing fails. When the instance
    /// context is present it is published to session storage under
    /// [`STOREFRONT_CONTEXT_SESSION_KEY`].
    pub async fn fetch_store_context(&self) -> Option<StorefrontContext> {
        let storefront = match self.client.storefront_instance_context().await {
            Ok(storefront) => storefront,
            Err(err) => {
                tracing::warn!(error = %err, "storefront instance context query failed");
                return None;
            }
        };

        match &storefront.instance {
            Some(context) => {
                self.session
                    .set_item(STOREFRONT_CONTEXT_SESSION_KEY, context.to_session_json());
                tracing::debug!(
                    key = STOREFRONT_CONTEXT_SESSION_KEY,
                    store_code = context.store_code.as_deref().unwrap_or_default(),
                    "published storefront instance context to session storage"
                );
            }
            None => tracing::info!("no dataServicesStorefrontInstanceContext"),
        }

        Some(storefront)
    }

    /// Fetches the installed extension version; `None` on failure or absence.
    pub async fn fetch_extension_version(&self) -> Option<ExtensionVersion> {
        match self.client.magento_extension_version().await {
            Ok(Some(version)) => Some(version),
            Ok(None) => {
                tracing::info!("no magentoExtensionVersion");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "magento extension context query failed");
                None
            }
        }
    }

    /// Injects the live-search script unless its global is already defined,
    /// then waits for the global.
    ///
    /// # Errors
    ///
    /// [`BootstrapError::WaitTimedOut`] or [`BootstrapError::TornDown`] if the
    /// global does not appear.
    pub async fn ensure_external_widget_loaded(&self) -> Result<(), BootstrapError> {
        let slot = self.globals.live_search();
        if slot.is_defined() {
            return Ok(());
        }

        tracing::info!(src = %self.settings.live_search_script_url, "injecting live-search script");
        self.document.append_script(&self.settings.live_search_script_url);
        slot.wait(self.settings.widget_wait_timeout, &self.teardown).await?;
        Ok(())
    }

    /// Instantiates the live-search widget and points the mini search form at
    /// the store's catalog search.
    ///
    /// # Errors
    ///
    /// - [`BootstrapError::Metadata`] if store-config metadata is unusable;
    ///   the widget is not instantiated.
    /// - [`BootstrapError::NotDefined`] if the widget global is not defined.
    pub fn activate_widget(&self, context: &StoreContext) -> Result<(), BootstrapError> {
        let metadata = read_store_config(self.document.as_ref())?;
        let factory = self
            .globals
            .live_search()
            .get()
            .ok_or(BootstrapError::NotDefined {
                global: LIVE_SEARCH_GLOBAL,
            })?;

        let config = LiveSearchConfig::new(context, &metadata);
        tracing::info!(
            store_code = config.store_code.as_deref().unwrap_or_default(),
            search_route = %config.search_route.route,
            "initializing live search"
        );
        factory.instantiate(config);

        match &context.store_url {
            Some(store_url) => {
                let action = format!("{store_url}catalogsearch/result");
                if !self.document.set_form_action(SEARCH_FORM_ID, &action) {
                    tracing::warn!(form = SEARCH_FORM_ID, "search form not found on page");
                }
            }
            None => tracing::warn!("store_url missing; search form action left unchanged"),
        }

        Ok(())
    }

    /// Waits for the storefront events SDK and pushes the extension, page,
    /// and storefront instance context into it.
    ///
    /// # Errors
    ///
    /// [`BootstrapError::WaitTimedOut`] or [`BootstrapError::TornDown`] if the
    /// SDK global does not appear.
    pub async fn activate_analytics_bridge(
        &self,
        context: &StoreContext,
        extension_version: Option<&ExtensionVersion>,
        store_config: Option<&StoreConfig>,
    ) -> Result<(), BootstrapError> {
        let events = self
            .globals
            .storefront_events()
            .wait(self.settings.analytics_wait_timeout, &self.teardown)
            .await?;

        tracing::info!(
            version = extension_version.map_or("", ExtensionVersion::as_str),
            "initializing magento extension"
        );
        events.set_magento_extension(MagentoExtension::new(extension_version));
        events.set_page(PageContext::product_detail());

        let instance = StorefrontInstance::new(context, store_config);
        tracing::info!(
            storefront_instance = %instance.log_view(),
            "initializing storefront instance"
        );
        events.set_storefront_instance(instance);
        Ok(())
    }
}
