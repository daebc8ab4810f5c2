//! Handler registry and format auto-detection
//!
//! A [`Registry`] is an ordered list of shared handler instances; detection
//! tries each handler in order and returns the first whose boundary pattern
//! matches. The process-wide default registry (YAML, JSON, TOML) is built
//! once and never mutated; callers needing different behavior clone and
//! extend it, or build their own.

use std::sync::{Arc, OnceLock};

use crate::handler::{Handler, JsonHandler, TomlHandler, YamlHandler};

/// An ordered collection of format handlers used for detection.
#[derive(Clone)]
pub struct Registry {
    handlers: Vec<Arc<dyn Handler>>,
}

impl Registry {
    /// An empty registry. Detection always fails until handlers are added.
    pub fn empty() -> Self {
        Self { handlers: Vec::new() }
    }

    /// The built-in registry: YAML, JSON, TOML, in that order.
    pub fn builtin() -> Self {
        Self {
            handlers: vec![
                Arc::new(YamlHandler),
                Arc::new(JsonHandler),
                Arc::new(TomlHandler),
            ],
        }
    }

    /// Returns a new registry with `handler` appended. The original is
    /// consumed; clone first to extend a shared registry.
    #[must_use]
    pub fn with(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Handlers in detection order.
    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.handlers
    }

    /// Find the first handler whose boundary pattern matches `text`.
    pub fn detect(&self, text: &str) -> Option<Arc<dyn Handler>> {
        self.handlers
            .iter()
            .find(|handler| handler.detect(text))
            .cloned()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The shared default registry, built on first use.
pub(crate) fn default_registry() -> &'static Registry {
    static DEFAULT: OnceLock<Registry> = OnceLock::new();
    DEFAULT.get_or_init(Registry::builtin)
}
