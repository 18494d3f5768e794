//! Configuration types shared by the dispatcher, transports, and middleware.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CarteiraError;

/// Environment variable holding the backend base URL.
pub const ENV_API_URL: &str = "CARTEIRA_API_URL";
/// Environment variable holding the static API key.
pub const ENV_API_KEY: &str = "CARTEIRA_API_KEY";
/// Environment variable toggling the fixture transport.
pub const ENV_USE_MOCK: &str = "CARTEIRA_USE_MOCK";
/// Environment variable overriding the response cache TTL in milliseconds.
pub const ENV_CACHE_DURATION_MS: &str = "CARTEIRA_CACHE_DURATION_MS";
/// Environment variable setting the per-request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "CARTEIRA_TIMEOUT_MS";

/// What the dispatcher does with a key the endpoint registry does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum UnknownKeyPolicy {
    /// Return an unsuccessful envelope tagged `UnknownKey` without issuing a request.
    #[default]
    Reject,
    /// Log a warning and send the request to the bare base URL.
    FailSoft,
}

/// Configuration for the in-memory TTL response cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Default time-to-live in milliseconds. `0` disables caching.
    pub default_ttl_ms: u64,
    /// Maximum number of cached responses.
    pub default_max_entries: u64,
    /// Per request-key TTL overrides in milliseconds. `0` disables caching for that key.
    pub per_key_ttl_ms: HashMap<String, u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_ms: 60_000,
            default_max_entries: 512,
            per_key_ttl_ms: HashMap::new(),
        }
    }
}

impl CacheConfig {
    /// A configuration with caching turned off.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            default_ttl_ms: 0,
            ..Self::default()
        }
    }

    /// Effective TTL for a request key, or `None` when caching is disabled for it.
    #[must_use]
    pub fn ttl_for(&self, key: &str) -> Option<Duration> {
        let ms = self
            .per_key_ttl_ms
            .get(key)
            .copied()
            .unwrap_or(self.default_ttl_ms);
        (ms > 0).then(|| Duration::from_millis(ms))
    }

    /// Returns true if any key may be cached.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.default_ttl_ms > 0 || self.per_key_ttl_ms.values().any(|&ms| ms > 0)
    }
}

/// Global configuration for the dispatcher and its transports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,
    /// Static key sent as `X-API-Key` on every request.
    pub api_key: String,
    /// Value of `X-Client-Version`.
    pub client_version: String,
    /// Optional per-request deadline enforced around the transport call.
    pub request_timeout: Option<Duration>,
    /// Serve deterministic fixture data instead of calling the backend.
    pub use_mock: bool,
    /// Handling of keys missing from the registry.
    pub unknown_key_policy: UnknownKeyPolicy,
    /// Response cache configuration. Disabled unless set explicitly or through
    /// `CARTEIRA_CACHE_DURATION_MS`, so every call reaches the transport by default.
    pub cache: CacheConfig,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            api_key: "carteira-dev-key".to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
            request_timeout: None,
            use_mock: false,
            unknown_key_policy: UnknownKeyPolicy::default(),
            cache: CacheConfig::disabled(),
        }
    }
}

impl DispatchConfig {
    /// Defaults overlaid with the `CARTEIRA_*` environment variables.
    ///
    /// # Errors
    /// Returns `Config` if a numeric or boolean variable cannot be parsed.
    pub fn from_env() -> Result<Self, CarteiraError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with values produced by `lookup` for each variable name.
    ///
    /// # Errors
    /// Returns `Config` if a numeric or boolean value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CarteiraError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(url) = lookup(ENV_API_URL) {
            cfg.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            cfg.api_key = key;
        }
        if let Some(raw) = lookup(ENV_USE_MOCK) {
            cfg.use_mock = parse_bool(ENV_USE_MOCK, &raw)?;
        }
        if let Some(raw) = lookup(ENV_CACHE_DURATION_MS) {
            cfg.cache.default_ttl_ms = parse_u64(ENV_CACHE_DURATION_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            let ms = parse_u64(ENV_TIMEOUT_MS, &raw)?;
            cfg.request_timeout = (ms > 0).then(|| Duration::from_millis(ms));
        }
        Ok(cfg)
    }
}

fn parse_u64(name: &str, raw: &str) -> Result<u64, CarteiraError> {
    raw.trim()
        .parse()
        .map_err(|_| CarteiraError::Config(format!("{name} must be an integer, got {raw:?}")))
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, CarteiraError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(CarteiraError::Config(format!(
            "{name} must be a boolean, got {raw:?}"
        ))),
    }
}
