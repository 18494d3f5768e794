use std::sync::Arc;
use std::time::Duration;

use carteira_core::headers::{APPLICATION_JSON, AUTHORIZATION, CONTENT_TYPE};
use carteira_core::{
    AuthOutcome, CacheConfig, CallMeta, CarteiraError, DispatchConfig, EndpointRegistry,
    HeaderPolicy, HttpMethod, Lookup, MemoryTokenStore, MiddlewareStack, RawResponse,
    RequestDescriptor, ResolvedRequest, ResponseEnvelope, TokenStore, Transport, TransportError,
    UnknownKeyPolicy, append_query, normalize, parse_body,
};
use carteira_middleware::{CacheHandle, TransportBuilder};

/// Turns logical request descriptors into HTTP calls and uniform response envelopes.
///
/// Registry, header policy, and configuration are fixed at build time and shared by
/// every call. The token store is the only mutable state; the dispatch path only reads
/// it. Wrap the dispatcher in an `Arc` to share it across tasks.
pub struct Dispatcher {
    pub(crate) cfg: DispatchConfig,
    registry: EndpointRegistry,
    headers: HeaderPolicy,
    pub(crate) tokens: Arc<dyn TokenStore>,
    transport: Arc<dyn Transport>,
    cache: Option<CacheHandle>,
    stack: MiddlewareStack,
}

/// Builder for constructing a [`Dispatcher`] with custom configuration.
pub struct DispatcherBuilder {
    cfg: DispatchConfig,
    registry: Option<EndpointRegistry>,
    headers: Option<HeaderPolicy>,
    tokens: Option<Arc<dyn TokenStore>>,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatcherBuilder {
    /// Create a new builder with `DispatchConfig::default()`.
    ///
    /// Without further setup the dispatcher uses the standard registry and header
    /// profiles, an in-memory token store, and the reqwest transport (or the fixture
    /// transport when `use_mock` is set).
    #[must_use]
    pub fn new() -> Self {
        Self {
            cfg: DispatchConfig::default(),
            registry: None,
            headers: None,
            tokens: None,
            transport: None,
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: DispatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Backend base URL. A trailing `/` is dropped.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.cfg.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Static key sent as `X-API-Key`.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.cfg.api_key = key.into();
        self
    }

    /// Value of `X-Client-Version`.
    #[must_use]
    pub fn client_version(mut self, version: impl Into<String>) -> Self {
        self.cfg.client_version = version.into();
        self
    }

    /// Deadline for each transport call.
    ///
    /// An expired deadline yields the network-error envelope tagged `Timeout`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Serve fixture data instead of calling the backend.
    ///
    /// Ignored when an explicit transport is supplied.
    #[must_use]
    pub const fn use_mock(mut self, yes: bool) -> Self {
        self.cfg.use_mock = yes;
        self
    }

    /// Handling of request keys the registry does not know.
    #[must_use]
    pub const fn unknown_key_policy(mut self, policy: UnknownKeyPolicy) -> Self {
        self.cfg.unknown_key_policy = policy;
        self
    }

    /// Response cache configuration. The dispatcher is uncached unless this is set.
    #[must_use]
    pub fn cache(mut self, cache: CacheConfig) -> Self {
        self.cfg.cache = cache;
        self
    }

    /// Turn the response cache off.
    #[must_use]
    pub fn without_cache(self) -> Self {
        self.cache(CacheConfig::disabled())
    }

    /// Custom endpoint table.
    #[must_use]
    pub fn registry(mut self, registry: EndpointRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Custom header policy. When unset it is derived from the final configuration.
    #[must_use]
    pub fn header_policy(mut self, policy: HeaderPolicy) -> Self {
        self.headers = Some(policy);
        self
    }

    /// Session token store shared with the login and logout flows.
    #[must_use]
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.tokens = Some(store);
        self
    }

    /// Raw transport. The cache layer is still applied on top according to the
    /// cache configuration.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the dispatcher.
    ///
    /// # Errors
    /// Returns `Config` if the base URL is empty, if the HTTP client cannot be
    /// constructed, or if no transport is available (the `http` feature is disabled
    /// and neither `use_mock` nor an explicit transport was set).
    pub fn build(self) -> Result<Dispatcher, CarteiraError> {
        if self.cfg.base_url.trim().is_empty() {
            return Err(CarteiraError::Config("base_url must not be empty".into()));
        }
        let raw = match self.transport {
            Some(t) => t,
            None => default_transport(&self.cfg)?,
        };
        let builder = TransportBuilder::new(raw).with_cache(&self.cfg.cache);
        let stack = builder.to_stack();
        let cache = builder.cache_handle();
        let headers = self
            .headers
            .unwrap_or_else(|| HeaderPolicy::new(&self.cfg));
        Ok(Dispatcher {
            registry: self.registry.unwrap_or_else(EndpointRegistry::standard),
            headers,
            tokens: self
                .tokens
                .unwrap_or_else(|| Arc::new(MemoryTokenStore::new())),
            transport: builder.build(),
            cache,
            stack,
            cfg: self.cfg,
        })
    }
}

fn default_transport(cfg: &DispatchConfig) -> Result<Arc<dyn Transport>, CarteiraError> {
    if cfg.use_mock {
        return Ok(Arc::new(carteira_mock::FixtureTransport::new()));
    }
    #[cfg(feature = "http")]
    {
        Ok(Arc::new(carteira_http::ReqwestTransport::new(cfg)?))
    }
    #[cfg(not(feature = "http"))]
    {
        Err(CarteiraError::Config(
            "no transport configured: enable the `http` feature, set use_mock, or supply one"
                .into(),
        ))
    }
}

impl Dispatcher {
    /// Start building a new `Dispatcher`.
    #[must_use]
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &DispatchConfig {
        &self.cfg
    }

    /// Endpoint table in use.
    #[must_use]
    pub const fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    /// Session token store in use.
    #[must_use]
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Middleware layers around the raw transport, outermost first.
    #[must_use]
    pub const fn middleware_stack(&self) -> &MiddlewareStack {
        &self.stack
    }

    /// Drop every cached response. A no-op when caching is disabled.
    pub fn invalidate_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
    }

    /// Resolve a descriptor into the exact request that would be sent.
    ///
    /// Steps: registry lookup, base URL prefix, query string, header profile plus
    /// smart headers, forced `Content-Type: application/json`, then bearer injection
    /// when `with_auth` is set and a token exists. No I/O besides the token read.
    ///
    /// # Errors
    /// Returns `UnknownKey` when the key is missing from the registry and the policy
    /// is `Reject`.
    pub fn resolve(
        &self,
        method: HttpMethod,
        descriptor: &RequestDescriptor,
    ) -> Result<ResolvedRequest, CarteiraError> {
        let key = descriptor.key.as_str();
        let endpoint = match self.registry.lookup(key) {
            Lookup::Found(path) => path,
            Lookup::NotFound => match self.cfg.unknown_key_policy {
                UnknownKeyPolicy::Reject => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(target: "carteira::dispatcher", key, "rejected unknown request key");
                    return Err(CarteiraError::unknown_key(key));
                }
                _ => self.registry.resolve(key),
            },
        };

        let url = append_query(
            &format!("{}{endpoint}", self.cfg.base_url),
            &descriptor.params,
        );

        let mut headers = self
            .headers
            .headers_for(key, descriptor.with_auth, Some(endpoint));
        headers.insert(CONTENT_TYPE, APPLICATION_JSON);

        let auth = if descriptor.with_auth {
            match self.tokens.get_auth_token() {
                Some(token) if !token.is_empty() => {
                    headers.insert(AUTHORIZATION, format!("Bearer {token}"));
                    AuthOutcome::Attached
                }
                _ => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(target: "carteira::dispatcher", key, "auth requested without a session token");
                    AuthOutcome::NoToken
                }
            }
        } else {
            AuthOutcome::NotRequested
        };

        let body = match method {
            HttpMethod::Post => descriptor.body.clone(),
            HttpMethod::Get => None,
        };

        Ok(ResolvedRequest {
            key: descriptor.key.clone(),
            method,
            url,
            endpoint: endpoint.to_string(),
            headers,
            body,
            auth,
        })
    }

    /// Issue a `GET` for `descriptor`.
    pub async fn get(&self, descriptor: RequestDescriptor) -> ResponseEnvelope {
        self.dispatch(HttpMethod::Get, descriptor).await
    }

    /// Issue a `POST` for `descriptor`, sending its body as JSON.
    pub async fn post(&self, descriptor: RequestDescriptor) -> ResponseEnvelope {
        self.dispatch(HttpMethod::Post, descriptor).await
    }

    /// Resolve, send, and normalize one call. Never fails: every outcome is an envelope.
    ///
    /// Identical concurrent calls are sent independently; there is no de-duplication
    /// and no retry. A `POST` answered with 2xx flushes the response cache.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "carteira::dispatcher::dispatch",
            skip_all,
            fields(key = %descriptor.key, method = %method),
        )
    )]
    pub async fn dispatch(
        &self,
        method: HttpMethod,
        descriptor: RequestDescriptor,
    ) -> ResponseEnvelope {
        let Ok(request) = self.resolve(method, &descriptor) else {
            return ResponseEnvelope::unknown_key(&descriptor.key);
        };
        let meta = CallMeta {
            key: request.key.clone(),
            method,
            endpoint: request.endpoint.clone(),
            with_auth: descriptor.with_auth,
        };

        let raw = match Self::send_with_timeout(
            self.transport.as_ref(),
            &request,
            self.cfg.request_timeout,
        )
        .await
        {
            Ok(raw) => raw,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "carteira::dispatcher", kind = e.kind(), error = %e, url = %request.url, "transport failure");
                return ResponseEnvelope::from_transport_error(e);
            }
        };

        if method == HttpMethod::Post && raw.is_success() {
            self.invalidate_cache();
        }

        match parse_body(&raw) {
            Ok(outcome) => normalize(outcome, &meta),
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "carteira::dispatcher", status = raw.status, error = %e, "unparsable response body");
                ResponseEnvelope::from_transport_error(e)
            }
        }
    }

    /// Send with an optional deadline and standardized timeout mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "carteira::dispatcher::send_with_timeout",
            skip_all,
            fields(
                transport = transport.name(),
                timeout_ms = timeout.map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
            ),
        )
    )]
    async fn send_with_timeout(
        transport: &dyn Transport,
        request: &ResolvedRequest,
        timeout: Option<Duration>,
    ) -> Result<RawResponse, TransportError> {
        match timeout {
            Some(t) => (tokio::time::timeout(t, transport.send(request)).await)
                .unwrap_or_else(|_| Err(TransportError::timeout(t))),
            None => transport.send(request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carteira_core::{RequestKey, keys};

    fn dispatcher() -> Dispatcher {
        Dispatcher::builder()
            .base_url("http://backend.test/")
            .use_mock(true)
            .without_cache()
            .build()
            .unwrap()
    }

    #[test]
    fn resolve_prefixes_base_url_once() {
        let d = dispatcher();
        let r = d
            .resolve(HttpMethod::Get, &RequestDescriptor::new(keys::HEALTH))
            .unwrap();
        assert_eq!(r.url, "http://backend.test/api/system/health/");
        assert_eq!(r.endpoint, "/api/system/health/");
        assert_eq!(r.auth, AuthOutcome::NotRequested);
    }

    #[test]
    fn get_drops_the_body() {
        let d = dispatcher();
        let desc = RequestDescriptor::new(keys::HEALTH).with_body(serde_json::json!({"x": 1}));
        assert_eq!(d.resolve(HttpMethod::Get, &desc).unwrap().body, None);
        assert!(d.resolve(HttpMethod::Post, &desc).unwrap().body.is_some());
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let d = Dispatcher::builder()
            .use_mock(true)
            .token_store(Arc::new(MemoryTokenStore::with_token("")))
            .build()
            .unwrap();
        let r = d
            .resolve(HttpMethod::Get, &RequestDescriptor::new(keys::USER).with_auth(true))
            .unwrap();
        assert_eq!(r.auth, AuthOutcome::NoToken);
        assert!(!r.headers.contains(AUTHORIZATION));
    }

    #[test]
    fn reject_policy_fails_resolution() {
        let d = dispatcher();
        let err = d
            .resolve(HttpMethod::Get, &RequestDescriptor::new(RequestKey::new("nope")))
            .unwrap_err();
        assert_eq!(err, CarteiraError::unknown_key("nope"));
    }

    #[test]
    fn empty_base_url_is_a_config_error() {
        let res = Dispatcher::builder().base_url("").use_mock(true).build();
        assert!(matches!(res, Err(CarteiraError::Config(_))));
    }
}
