//! Builder for composing transports with middleware layers.
//!
//! # Middleware Ordering Convention
//!
//! Middleware layers form an "onion" around the raw transport:
//!
//! ```text
//! Dispatcher
//!     ↓
//! Outermost Middleware (first to see the request, last to see the response)
//!     ↓
//! Inner Middleware (e.g., Cache - answers repeated GETs)
//!     ↓
//! Raw Transport (e.g., reqwest - makes actual HTTP calls)
//! ```
//!
//! The `layers` vector stores middleware in **outermost-first** order (last added =
//! outermost), and `build()` applies it in reverse to construct the nesting.
//!
//! ```text
//! builder.with_cache(..).layer(custom)
//!
//! Storage: [Custom, Cache]
//! Result:   Custom(Cache(Raw))
//! ```

use std::sync::Arc;

use carteira_core::{Middleware, Transport};
use carteira_types::{CacheConfig, MiddlewareLayer, MiddlewareStack};
use serde_json::json;

use crate::cache::{CACHE_LAYER, CacheHandle, CacheMiddleware};

/// Generic middleware builder for composing a transport with layered wrappers.
///
/// See [module-level documentation](self) for details on middleware ordering.
pub struct TransportBuilder {
    raw: Arc<dyn Transport>,
    /// Middleware layers in outermost-first order.
    layers: Vec<Box<dyn Middleware>>,
    cache: Option<CacheHandle>,
}

impl TransportBuilder {
    /// Create a new builder from a raw, unwrapped transport.
    #[must_use]
    pub fn new(raw: Arc<dyn Transport>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
            cache: None,
        }
    }

    /// Add or replace the response cache.
    ///
    /// A configuration with caching disabled removes the layer instead.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self = self.without_cache();
        if cfg.is_enabled() {
            let cache = CacheMiddleware::new(cfg.clone());
            self.cache = Some(cache.handle());
            self.layers.insert(0, Box::new(cache));
        }
        self
    }

    /// Remove the response cache if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != CACHE_LAYER);
        self.cache = None;
        self
    }

    /// Handle onto the response cache, when one is configured.
    #[must_use]
    pub fn cache_handle(&self) -> Option<CacheHandle> {
        self.cache.clone()
    }

    /// Add an arbitrary middleware layer at the outermost position.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        self.layers.insert(0, layer);
        self
    }

    /// Export the current middleware stack configuration for inspection.
    ///
    /// The raw transport is appended as the innermost "layer" for observability.
    #[must_use]
    pub fn to_stack(&self) -> MiddlewareStack {
        let mut stack = MiddlewareStack::new();
        for layer in &self.layers {
            stack.push_inner(MiddlewareLayer::new(layer.name(), layer.config_json()));
        }
        stack.push_inner(MiddlewareLayer::new(
            "RawTransport",
            json!({ "name": self.raw.name() }),
        ));
        stack
    }

    /// Build the wrapped transport, applying layers innermost first.
    #[must_use]
    pub fn build(self) -> Arc<dyn Transport> {
        let mut acc: Arc<dyn Transport> = Arc::clone(&self.raw);
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }
}
