use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use carteira_core::{Middleware, Transport};
use carteira_types::{CacheConfig, HttpMethod, RawResponse, ResolvedRequest, TransportError};
use moka::Expiry;
use moka::future::Cache;

pub(crate) const CACHE_LAYER: &str = "CacheMiddleware";

/// Identity of a cached response: method, URL, and the full header set.
///
/// Headers are part of the key so responses fetched with different bearer tokens
/// are never shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ResponseKey {
    method: HttpMethod,
    url: String,
    headers: Vec<(String, String)>,
}

impl ResponseKey {
    fn from_request(req: &ResolvedRequest) -> Self {
        let mut headers: Vec<(String, String)> = req
            .headers
            .iter()
            .map(|(n, v)| (n.to_ascii_lowercase(), v.to_string()))
            .collect();
        headers.sort();
        Self {
            method: req.method,
            url: req.url.clone(),
            headers,
        }
    }
}

#[derive(Clone)]
struct Entry {
    response: Arc<RawResponse>,
    ttl: Duration,
}

struct EntryTtl;

impl Expiry<ResponseKey, Entry> for EntryTtl {
    fn expire_after_create(
        &self,
        _key: &ResponseKey,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

fn new_store(cfg: &CacheConfig) -> Cache<ResponseKey, Entry> {
    Cache::builder()
        .max_capacity(cfg.default_max_entries.max(1))
        .expire_after(EntryTtl)
        .build()
}

/// Shared view of a response cache, used to flush it from outside the transport stack.
#[derive(Clone)]
pub struct CacheHandle {
    store: Cache<ResponseKey, Entry>,
}

impl CacheHandle {
    /// Drop every cached response.
    pub fn invalidate_all(&self) {
        self.store.invalidate_all();
    }

    /// Number of live entries after pending maintenance has run.
    pub async fn entry_count(&self) -> u64 {
        self.store.run_pending_tasks().await;
        self.store.entry_count()
    }
}

/// Declarative wrapper that applies caching when building a transport stack.
pub struct CacheMiddleware {
    cfg: CacheConfig,
    store: Cache<ResponseKey, Entry>,
}

impl CacheMiddleware {
    /// Middleware backed by a fresh, empty cache sized from `cfg`.
    #[must_use]
    pub fn new(cfg: CacheConfig) -> Self {
        let store = new_store(&cfg);
        Self { cfg, store }
    }

    /// Handle onto the cache the wrapped transport will fill.
    #[must_use]
    pub fn handle(&self) -> CacheHandle {
        CacheHandle {
            store: self.store.clone(),
        }
    }
}

impl Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn Transport>) -> Arc<dyn Transport> {
        let Self { cfg, store } = *self;
        Arc::new(CachingTransport { inner, cfg, store })
    }

    fn name(&self) -> &'static str {
        CACHE_LAYER
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "default_ttl_ms": self.cfg.default_ttl_ms,
            "default_max_entries": self.cfg.default_max_entries,
            "per_key_ttl_ms": self.cfg.per_key_ttl_ms,
        })
    }
}

/// Transport that answers repeated successful `GET`s from memory until their TTL elapses.
///
/// `POST`s, non-2xx responses, and transport errors always pass through uncached.
pub struct CachingTransport {
    inner: Arc<dyn Transport>,
    cfg: CacheConfig,
    store: Cache<ResponseKey, Entry>,
}

impl CachingTransport {
    /// Wrap `inner` with a fresh cache sized from `cfg`.
    #[must_use]
    pub fn new(inner: Arc<dyn Transport>, cfg: CacheConfig) -> Self {
        let store = new_store(&cfg);
        Self { inner, cfg, store }
    }

    /// Handle onto this transport's cache.
    #[must_use]
    pub fn handle(&self) -> CacheHandle {
        CacheHandle {
            store: self.store.clone(),
        }
    }
}

#[async_trait]
impl Transport for CachingTransport {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn send(&self, request: &ResolvedRequest) -> Result<RawResponse, TransportError> {
        let ttl = match request.method {
            HttpMethod::Get => self.cfg.ttl_for(request.key.as_str()),
            HttpMethod::Post => None,
        };
        let Some(ttl) = ttl else {
            return self.inner.send(request).await;
        };

        let key = ResponseKey::from_request(request);
        if let Some(hit) = self.store.get(&key).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "carteira::cache", key = %request.key, url = %request.url, "cache hit");
            return Ok((*hit.response).clone());
        }

        let response = self.inner.send(request).await?;
        if response.is_success() {
            self.store
                .insert(
                    key,
                    Entry {
                        response: Arc::new(response.clone()),
                        ttl,
                    },
                )
                .await;
        }
        Ok(response)
    }
}
