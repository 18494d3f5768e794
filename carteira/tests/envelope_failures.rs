use std::time::Duration;

use carteira::{CarteiraError, HttpMethod, RequestDescriptor, TransportError, keys};
use serde_json::json;

mod helpers;
use helpers::*;

#[tokio::test]
async fn transport_failure_collapses_to_network_error() {
    let (d, ctrl) = mock_dispatcher();
    ctrl.set_behavior(
        HttpMethod::Get,
        "/api/system/health/",
        MockBehavior::Fail(TransportError::ConnectionFailed("connection refused".into())),
    )
    .await;

    let env = d.get(RequestDescriptor::new(keys::HEALTH)).await;
    assert!(!env.success);
    assert_eq!(env.status, 500);
    assert_eq!(env.message.as_deref(), Some("Network error"));
    assert_eq!(env.data, None);
    assert!(matches!(
        env.transport_error(),
        Some(TransportError::ConnectionFailed(_))
    ));
}

#[tokio::test]
async fn deadline_yields_tagged_timeout() {
    let (b, ctrl) = mock_builder();
    let d = b.request_timeout(Duration::from_millis(50)).build().unwrap();
    ctrl.set_behavior(HttpMethod::Get, "/api/mercado/indices/", MockBehavior::Hang)
        .await;

    let env = d.get(RequestDescriptor::new(keys::MARKET_INDICES)).await;
    assert_eq!(env.status, 500);
    assert_eq!(env.message.as_deref(), Some("Network error"));
    assert_eq!(
        env.failure,
        Some(CarteiraError::Transport(TransportError::Timeout {
            after_ms: Some(50)
        }))
    );
}

#[tokio::test]
async fn non_json_body_is_an_invalid_response() {
    let (d, ctrl) = mock_dispatcher();
    ctrl.set_fallback(raw(502, "Bad Gateway", b"<html>gateway</html>"))
        .await;

    let env = d.get(RequestDescriptor::new(keys::HEALTH)).await;
    assert_eq!(env.status, 500);
    assert!(matches!(
        env.transport_error(),
        Some(TransportError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn application_failure_keeps_status_body_and_reason() {
    let (d, ctrl) = mock_dispatcher();
    ctrl.set_behavior(
        HttpMethod::Post,
        "/api/budget/custos/adicionar/",
        status(400, json!({ "valor": ["Informe um número válido."] })),
    )
    .await;

    let env = d
        .post(
            RequestDescriptor::new(keys::BUDGET_ADD_COST)
                .with_body(json!({ "valor": "abc" }))
                .with_auth(true),
        )
        .await;
    assert!(!env.success);
    assert_eq!(env.status, 400);
    assert_eq!(env.message.as_deref(), Some("Bad Request"));
    assert_eq!(env.data, Some(json!({ "valor": ["Informe um número válido."] })));
    assert!(env.failure.is_none());
}

#[tokio::test]
async fn empty_success_body_has_no_data() {
    let (d, ctrl) = mock_dispatcher();
    ctrl.set_fallback(raw(204, "No Content", b"")).await;

    let env = d
        .post(RequestDescriptor::new(keys::BUDGET_DELETE_ENTRY).with_body(json!({ "id": 11 })))
        .await;
    assert!(env.success);
    assert_eq!(env.status, 204);
    assert_eq!(env.data, None);
    assert_eq!(env.message, None);
}
