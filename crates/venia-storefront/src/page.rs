//! Seams to the hosting page: the document and session-scoped storage.
//!
//! The orchestrator only ever talks to these traits. The in-memory
//! implementations back the CLI driver and the tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The subset of the DOM the bootstrap touches.
pub trait Document: Send + Sync {
    /// `content` attribute of `meta[name="{name}"]`, if the tag exists.
    fn meta_content(&self, name: &str) -> Option<String>;

    /// A `data-*` attribute on `<body>`, keyed by its camel-cased name.
    fn body_data(&self, key: &str) -> Option<String>;

    /// Appends `<script type="text/javascript" src="{src}">` to `<head>`.
    fn append_script(&self, src: &str);

    /// Sets the `action` attribute of the form with id `form_id`.
    /// Returns `false` when no such form exists.
    fn set_form_action(&self, form_id: &str, action: &str) -> bool;
}

/// Session-scoped key/value storage shared with externally loaded widgets.
pub trait SessionStore: Send + Sync {
    fn set_item(&self, key: &str, value: String);
    fn get_item(&self, key: &str) -> Option<String>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

type ScriptLoader = Box<dyn Fn(&str) + Send + Sync>;

/// In-memory [`Document`].
#[derive(Default)]
pub struct MemoryDocument {
    meta: HashMap<String, String>,
    body_data: HashMap<String, String>,
    forms: Mutex<HashMap<String, Option<String>>>,
    scripts: Mutex<Vec<String>>,
    script_loader: Option<ScriptLoader>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_meta(mut self, name: &str, content: &str) -> Self {
        self.meta.insert(name.to_owned(), content.to_owned());
        self
    }

    #[must_use]
    pub fn with_body_data(mut self, key: &str, value: &str) -> Self {
        self.body_data.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Adds an empty form with the given id.
    #[must_use]
    pub fn with_form(self, form_id: &str) -> Self {
        lock(&self.forms).insert(form_id.to_owned(), None);
        self
    }

    /// Runs `loader` with the script URL every time a script is appended,
    /// standing in for the browser fetching and evaluating it.
    #[must_use]
    pub fn with_script_loader<F>(mut self, loader: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.script_loader = Some(Box::new(loader));
        self
    }

    /// Script URLs appended so far, in order.
    #[must_use]
    pub fn scripts(&self) -> Vec<String> {
        lock(&self.scripts).clone()
    }

    /// Current `action` of the form, `None` if unset or the form is absent.
    #[must_use]
    pub fn form_action(&self, form_id: &str) -> Option<String> {
        lock(&self.forms).get(form_id).cloned().flatten()
    }
}

impl Document for MemoryDocument {
    fn meta_content(&self, name: &str) -> Option<String> {
        self.meta.get(name).cloned()
    }

    fn body_data(&self, key: &str) -> Option<String> {
        self.body_data.get(key).cloned()
    }

    fn append_script(&self, src: &str) {
        lock(&self.scripts).push(src.to_owned());
        if let Some(loader) = &self.script_loader {
            loader(src);
        }
    }

    fn set_form_action(&self, form_id: &str, action: &str) -> bool {
        match lock(&self.forms).get_mut(form_id) {
            Some(slot) => {
                *slot = Some(action.to_owned());
                true
            }
            None => false,
        }
    }
}

/// In-memory [`SessionStore`].
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.items).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn set_item(&self, key: &str, value: String) {
        lock(&self.items).insert(key.to_owned(), value);
    }

    fn get_item(&self, key: &str) -> Option<String> {
        lock(&self.items).get(key).cloned()
    }
}
