#![allow(dead_code)]
use carteira_core::{AuthOutcome, HeaderSet, HttpMethod, RequestKey, ResolvedRequest};

pub fn request(key: &'static str, method: HttpMethod, endpoint: &str) -> ResolvedRequest {
    ResolvedRequest {
        key: RequestKey::from_static(key),
        method,
        url: format!("http://backend.test{endpoint}"),
        endpoint: endpoint.to_string(),
        headers: HeaderSet::new().with("Content-Type", "application/json"),
        body: None,
        auth: AuthOutcome::NotRequested,
    }
}

pub fn ttl_cfg(key: &str, ms: u64) -> carteira_types::CacheConfig {
    let mut cfg = carteira_types::CacheConfig::disabled();
    cfg.per_key_ttl_ms.insert(key.into(), ms);
    cfg
}
