//! Registry of the external globals the bootstrap waits on.
//!
//! A page script "defining" a global is modelled as filling a [`Slot`]. Waiting
//! for a slot is a watch-channel subscription with an optional deadline, raced
//! against the page's [`Teardown`] signal, so no wait outlives the page.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::analytics::StorefrontEvents;
use crate::error::BootstrapError;
use crate::widget::LiveSearchFactory;

pub const LIVE_SEARCH_GLOBAL: &str = "LiveSearchAutocomplete";
pub const STOREFRONT_EVENTS_GLOBAL: &str = "magentoStorefrontEvents";

/// A single named global that starts undefined and may be defined later.
pub struct Slot<T: ?Sized> {
    name: &'static str,
    tx: watch::Sender<Option<Arc<T>>>,
}

impl<T: ?Sized + Send + Sync> Slot<T> {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { name, tx }
    }

    /// Defines (or redefines) the global and wakes every waiter.
    pub fn define(&self, value: Arc<T>) {
        tracing::debug!(global = self.name, "global defined");
        self.tx.send_replace(Some(value));
    }

    #[must_use]
    pub fn get(&self) -> Option<Arc<T>> {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Suspends until the global is defined.
    ///
    /// Resolves immediately if it already is. `deadline` of `None` waits
    /// without a time bound; teardown still ends the wait.
    ///
    /// # Errors
    ///
    /// - [`BootstrapError::WaitTimedOut`] if `deadline` elapses first.
    /// - [`BootstrapError::TornDown`] if `teardown` fires first.
    pub async fn wait(
        &self,
        deadline: Option<Duration>,
        teardown: &Teardown,
    ) -> Result<Arc<T>, BootstrapError> {
        let global = self.name;
        let mut defined = self.tx.subscribe();
        let mut torn_down = teardown.subscribe();

        let race = async {
            tokio::select! {
                biased;
                value = defined.wait_for(Option::is_some) => value
                    .ok()
                    .and_then(|v| (*v).clone())
                    .ok_or(BootstrapError::TornDown { global }),
                _ = torn_down.wait_for(|down| *down) => Err(BootstrapError::TornDown { global }),
            }
        };

        match deadline {
            Some(waited) => tokio::time::timeout(waited, race)
                .await
                .map_err(|_| BootstrapError::WaitTimedOut { global, waited })?,
            None => race.await,
        }
    }
}

/// The external globals a storefront page may expose.
#[derive(Clone)]
pub struct Globals {
    live_search: Arc<Slot<dyn LiveSearchFactory>>,
    storefront_events: Arc<Slot<dyn StorefrontEvents>>,
}

impl Default for Globals {
    fn default() -> Self {
        Self::new()
    }
}

impl Globals {
    #[must_use]
    pub fn new() -> Self {
        Self {
            live_search: Arc::new(Slot::new(LIVE_SEARCH_GLOBAL)),
            storefront_events: Arc::new(Slot::new(STOREFRONT_EVENTS_GLOBAL)),
        }
    }

    /// `window.LiveSearchAutocomplete`
    #[must_use]
    pub fn live_search(&self) -> &Slot<dyn LiveSearchFactory> {
        &self.live_search
    }

    /// `window.magentoStorefrontEvents`
    #[must_use]
    pub fn storefront_events(&self) -> &Slot<dyn StorefrontEvents> {
        &self.storefront_events
    }
}

/// Page/component teardown signal. Cloning shares the signal.
#[derive(Clone)]
pub struct Teardown {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for Teardown {
    fn default() -> Self {
        Self::new()
    }
}

impl Teardown {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Ends every pending and future wait tied to this signal.
    pub fn fire(&self) {
        self.tx.send_replace(true);
    }

    #[must_use]
    pub fn is_fired(&self) -> bool {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}
