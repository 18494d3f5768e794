#![cfg(feature = "http")]

use std::sync::Arc;

use carteira::{Dispatcher, MemoryTokenStore, ReqwestTransport, TokenStore, TransportError};
use carteira_core::DispatchConfig;
use httpmock::prelude::*;
use serde_json::json;

fn dispatcher_for(server: &MockServer, store: Arc<dyn TokenStore>) -> Dispatcher {
    let cfg = DispatchConfig {
        base_url: server.base_url(),
        api_key: "e2e-key".into(),
        ..DispatchConfig::default()
    };
    let transport = Arc::new(ReqwestTransport::new(&cfg).unwrap());
    Dispatcher::builder()
        .config(cfg)
        .without_cache()
        .token_store(store)
        .transport(transport)
        .build()
        .unwrap()
}

#[tokio::test]
async fn login_posts_credentials_with_public_headers() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/auth/login/")
                .header("Content-Type", "application/json")
                .header("X-API-Key", "e2e-key")
                .header("X-Request-Source", "public")
                .header_missing("Authorization")
                .json_body(json!({ "username": "alice", "password": "secret" }));
            then.status(200)
                .json_body(json!({ "access": "abc123", "refresh": "r-1" }));
        })
        .await;

    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let d = dispatcher_for(&server, Arc::clone(&store));

    assert!(d.login("alice", "secret").await);
    mock.assert_async().await;
    assert_eq!(store.get_auth_token().as_deref(), Some("abc123"));
    assert_eq!(store.get_refresh_token().as_deref(), Some("r-1"));
}

#[tokio::test]
async fn login_rejected_by_backend_returns_false() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/auth/login/");
            then.status(401)
                .json_body(json!({ "detail": "No active account found" }));
        })
        .await;

    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    let d = dispatcher_for(&server, Arc::clone(&store));
    assert!(!d.login("alice", "wrong").await);
    assert_eq!(store.get_auth_token(), None);
}

#[tokio::test]
async fn user_data_carries_bearer_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/auth/user/")
                .header("Authorization", "Bearer abc123")
                .header("X-Request-Source", "private")
                .header("Cache-Control", "no-store");
            then.status(200)
                .json_body(json!({ "id": 7, "username": "alice" }));
        })
        .await;

    let d = dispatcher_for(&server, Arc::new(MemoryTokenStore::with_token("abc123")));
    let data = d.get_user_data().await;
    mock.assert_async().await;
    assert_eq!(data, Some(json!({ "id": 7, "username": "alice" })));
}

#[tokio::test]
async fn user_data_failure_is_none() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/auth/user/");
            then.status(500).json_body(json!({ "detail": "boom" }));
        })
        .await;

    let d = dispatcher_for(&server, Arc::new(MemoryTokenStore::with_token("abc123")));
    assert_eq!(d.get_user_data().await, None);
}

#[tokio::test]
async fn ranking_sends_tipo_without_authorization() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/ranking/")
                .query_param("tipo", "acoes")
                .header_missing("Authorization");
            then.status(200)
                .json_body(json!([{ "posicao": 1, "ticker": "BBAS3" }]));
        })
        .await;

    // A held token must not leak onto a public call.
    let d = dispatcher_for(&server, Arc::new(MemoryTokenStore::with_token("abc123")));
    let data = d.get_ranking("acoes").await;
    mock.assert_async().await;
    assert_eq!(data, Some(json!([{ "posicao": 1, "ticker": "BBAS3" }])));
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let cfg = DispatchConfig {
        base_url: format!("http://127.0.0.1:{port}"),
        ..DispatchConfig::default()
    };
    let d = carteira::connect(DispatchConfig {
        cache: carteira::CacheConfig::disabled(),
        ..cfg
    })
    .unwrap();

    let env = d
        .get(carteira::RequestDescriptor::new(carteira::keys::HEALTH))
        .await;
    assert_eq!(env.status, 500);
    assert_eq!(env.message.as_deref(), Some("Network error"));
    assert!(matches!(
        env.transport_error(),
        Some(TransportError::ConnectionFailed(_))
    ));
    assert_eq!(d.get_ranking("acoes").await, None);
}
