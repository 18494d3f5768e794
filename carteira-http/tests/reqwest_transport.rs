use std::time::Duration;

use carteira_core::{
    AuthOutcome, DispatchConfig, HeaderSet, HttpMethod, RequestKey, ResolvedRequest, Transport,
    TransportError,
};
use carteira_http::ReqwestTransport;
use httpmock::prelude::*;
use serde_json::json;

fn resolved(method: HttpMethod, url: String, endpoint: &str) -> ResolvedRequest {
    ResolvedRequest {
        key: RequestKey::new("test"),
        method,
        url,
        endpoint: endpoint.to_string(),
        headers: HeaderSet::new()
            .with("Content-Type", "application/json")
            .with("X-API-Key", "k-1"),
        body: None,
        auth: AuthOutcome::NotRequested,
    }
}

fn transport() -> ReqwestTransport {
    ReqwestTransport::new(&DispatchConfig::default()).unwrap()
}

#[tokio::test]
async fn get_sends_headers_and_returns_status_and_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/ranking/")
                .query_param("tipo", "fiis")
                .header("X-API-Key", "k-1");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([{"ticker": "HGLG11"}]));
        })
        .await;

    let req = resolved(
        HttpMethod::Get,
        server.url("/api/ranking/?tipo=fiis"),
        "/api/ranking/",
    );
    let resp = transport().send(&req).await.unwrap();
    mock.assert_async().await;

    assert_eq!(resp.status, 200);
    assert_eq!(resp.status_text, "OK");
    assert_eq!(resp.headers.get("Content-Type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_slice(&resp.body).unwrap();
    assert_eq!(body, json!([{"ticker": "HGLG11"}]));
}

#[tokio::test]
async fn post_serializes_json_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/auth/login/")
                .header("Content-Type", "application/json")
                .json_body(json!({"username": "ana", "password": "s3cret"}));
            then.status(200).json_body(json!({"access": "t"}));
        })
        .await;

    let mut req = resolved(
        HttpMethod::Post,
        server.url("/api/auth/login/"),
        "/api/auth/login/",
    );
    req.body = Some(json!({"username": "ana", "password": "s3cret"}));
    let resp = transport().send(&req).await.unwrap();
    mock.assert_async().await;
    assert_eq!(resp.status, 200);
}

#[tokio::test]
async fn error_status_is_a_response_not_a_transport_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/auth/user/");
            then.status(401).json_body(json!({"detail": "expired"}));
        })
        .await;

    let req = resolved(
        HttpMethod::Get,
        server.url("/api/auth/user/"),
        "/api/auth/user/",
    );
    let resp = transport().send(&req).await.unwrap();
    assert_eq!(resp.status, 401);
    assert_eq!(resp.status_text, "Unauthorized");
    assert!(!resp.is_success());
}

#[tokio::test]
async fn refused_connection_maps_to_connection_failed() {
    // Bind then drop a listener to get a port nothing is listening on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let req = resolved(
        HttpMethod::Get,
        format!("http://127.0.0.1:{port}/api/system/health/"),
        "/api/system/health/",
    );
    let err = transport().send(&req).await.unwrap_err();
    assert!(matches!(err, TransportError::ConnectionFailed(_)), "{err:?}");
}

#[tokio::test]
async fn slow_server_maps_to_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/slow/");
            then.status(200).delay(Duration::from_millis(500));
        })
        .await;

    let cfg = DispatchConfig {
        request_timeout: Some(Duration::from_millis(50)),
        ..DispatchConfig::default()
    };
    let t = ReqwestTransport::new(&cfg).unwrap();
    let err = t
        .send(&resolved(HttpMethod::Get, server.url("/slow/"), "/slow/"))
        .await
        .unwrap_err();
    assert_eq!(err, TransportError::Timeout { after_ms: Some(50) });
}

#[tokio::test]
async fn wrapped_client_keeps_its_own_settings() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/system/health/")
                .header("user-agent", "painel/2.0");
            then.status(200).json_body(json!({"status": "ok"}));
        })
        .await;

    let client = reqwest::Client::builder()
        .user_agent("painel/2.0")
        .build()
        .unwrap();
    let t = ReqwestTransport::with_client(client);
    let resp = t
        .send(&resolved(
            HttpMethod::Get,
            server.url("/api/system/health/"),
            "/api/system/health/",
        ))
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(resp.status, 200);
}

#[tokio::test]
async fn wrapped_client_timeout_reports_no_deadline() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/slow/");
            then.status(200).delay(Duration::from_millis(500));
        })
        .await;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let err = ReqwestTransport::with_client(client)
        .send(&resolved(HttpMethod::Get, server.url("/slow/"), "/slow/"))
        .await
        .unwrap_err();
    assert_eq!(err, TransportError::Timeout { after_ms: None });
}
