use std::time::Duration;

use carteira_core::{
    AuthOutcome, HeaderSet, HttpMethod, RequestKey, ResolvedRequest, Transport, TransportError,
};
use carteira_mock::{DynamicMockTransport, MockBehavior, json_response};
use serde_json::json;

fn get(endpoint: &str) -> ResolvedRequest {
    ResolvedRequest {
        key: RequestKey::new("k"),
        method: HttpMethod::Get,
        url: format!("http://mock{endpoint}"),
        endpoint: endpoint.to_string(),
        headers: HeaderSet::new(),
        body: None,
        auth: AuthOutcome::NotRequested,
    }
}

#[tokio::test]
async fn scripted_return_and_fail_are_honored_and_logged() {
    let (t, ctrl) = DynamicMockTransport::new_with_controller("dyn");
    ctrl.set_behavior(
        HttpMethod::Get,
        "/a/",
        MockBehavior::Return(json_response(200, &json!({"ok": 1}))),
    )
    .await;
    ctrl.set_behavior(
        HttpMethod::Get,
        "/b/",
        MockBehavior::Fail(TransportError::ConnectionFailed("refused".into())),
    )
    .await;

    assert_eq!(t.send(&get("/a/")).await.unwrap().status, 200);
    assert!(matches!(
        t.send(&get("/b/")).await,
        Err(TransportError::ConnectionFailed(_))
    ));
    assert_eq!(t.send(&get("/c/")).await.unwrap().status, 404);

    assert_eq!(ctrl.call_count().await, 3);
    let endpoints: Vec<String> = ctrl.requests().await.into_iter().map(|r| r.endpoint).collect();
    assert_eq!(endpoints, ["/a/", "/b/", "/c/"]);
}

#[tokio::test]
async fn fallback_applies_to_unmatched_requests() {
    let (t, ctrl) = DynamicMockTransport::new_with_controller("dyn");
    ctrl.set_fallback(MockBehavior::Return(json_response(204, &json!(null))))
        .await;
    assert_eq!(t.send(&get("/anything/")).await.unwrap().status, 204);
    ctrl.clear_all().await;
    assert_eq!(t.send(&get("/anything/")).await.unwrap().status, 404);
    assert_eq!(ctrl.call_count().await, 1);
}

#[tokio::test]
async fn hang_never_completes() {
    let (t, ctrl) = DynamicMockTransport::new_with_controller("dyn");
    ctrl.set_behavior(HttpMethod::Get, "/slow/", MockBehavior::Hang)
        .await;
    let req = get("/slow/");
    let res = tokio::time::timeout(Duration::from_millis(50), t.send(&req)).await;
    assert!(res.is_err());
}
