use std::collections::HashMap;

use carteira_types::{DispatchConfig, HeaderProfile, HeaderSet, RequestKey};

use crate::registry::STANDARD_PROFILES;

/// `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";
/// `Authorization` header name.
pub const AUTHORIZATION: &str = "Authorization";
/// JSON media type.
pub const APPLICATION_JSON: &str = "application/json";

/// Resolves a request key to its header profile and the concrete headers of that profile.
///
/// Both profiles are built once from the configuration. Neither carries an
/// `Authorization` header; the dispatcher injects the bearer token per call.
#[derive(Debug, Clone)]
pub struct HeaderPolicy {
    profiles: HashMap<RequestKey, HeaderProfile>,
    public: HeaderSet,
    private: HeaderSet,
}

impl HeaderPolicy {
    /// Standard key-to-profile table with headers derived from `cfg`.
    #[must_use]
    pub fn new(cfg: &DispatchConfig) -> Self {
        Self::with_profiles(cfg, STANDARD_PROFILES.iter().copied())
    }

    /// Custom key-to-profile table with headers derived from `cfg`.
    pub fn with_profiles<I>(cfg: &DispatchConfig, rows: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, HeaderProfile)>,
    {
        let profiles = rows
            .into_iter()
            .map(|(k, p)| (RequestKey::from_static(k), p))
            .collect();
        Self {
            profiles,
            public: base_headers(cfg, HeaderProfile::Public),
            private: base_headers(cfg, HeaderProfile::Private),
        }
    }

    /// Profile for `key`. Unknown keys fall back to `Public`.
    #[must_use]
    pub fn profile_for(&self, key: &str) -> HeaderProfile {
        self.profiles.get(key).copied().unwrap_or_default()
    }

    /// Concrete headers of a profile.
    #[must_use]
    pub const fn profile_headers(&self, profile: HeaderProfile) -> &HeaderSet {
        match profile {
            HeaderProfile::Public => &self.public,
            HeaderProfile::Private => &self.private,
        }
    }

    /// Headers for a call: the key's profile, overlaid with [`smart_headers`] when an
    /// endpoint is supplied.
    ///
    /// `with_auth` is accepted for call-site symmetry only; token injection happens in
    /// the dispatcher.
    #[must_use]
    pub fn headers_for(&self, key: &str, with_auth: bool, endpoint: Option<&str>) -> HeaderSet {
        let _ = with_auth;
        let mut headers = self.profile_headers(self.profile_for(key)).clone();
        if let Some(ep) = endpoint {
            headers.merge(&smart_headers(ep));
        }
        headers
    }
}

fn base_headers(cfg: &DispatchConfig, profile: HeaderProfile) -> HeaderSet {
    HeaderSet::new()
        .with(CONTENT_TYPE, APPLICATION_JSON)
        .with("Accept", APPLICATION_JSON)
        .with("X-API-Key", cfg.api_key.as_str())
        .with("X-Client-Version", cfg.client_version.as_str())
        .with("X-Request-Source", profile.as_str())
        .with("X-Requested-With", "XMLHttpRequest")
}

/// Endpoint-driven header adjustments. Pure function of the endpoint string.
///
/// - upload endpoints ask for `multipart/form-data`;
/// - export/report endpoints accept CSV;
/// - auth endpoints must not be cached by intermediaries.
#[must_use]
pub fn smart_headers(endpoint: &str) -> HeaderSet {
    let ep = endpoint.to_ascii_lowercase();
    let mut headers = HeaderSet::new();
    if ep.contains("/upload") {
        headers.insert(CONTENT_TYPE, "multipart/form-data");
    }
    if ep.contains("/export") || ep.contains("/relatorio") {
        headers.insert("Accept", "text/csv, application/json");
    }
    if ep.contains("/auth/") {
        headers.insert("Cache-Control", "no-store");
    }
    headers
}
