use carteira::{CarteiraError, RequestDescriptor, RequestKey, UnknownKeyPolicy};
use serde_json::json;

mod helpers;
use helpers::*;

#[tokio::test]
async fn rejected_key_never_reaches_the_transport() {
    let (d, ctrl) = mock_dispatcher();
    let env = d
        .get(RequestDescriptor::new(RequestKey::new("budgetOverveiw")))
        .await;
    assert!(!env.success);
    assert_eq!(env.status, 404);
    assert_eq!(
        env.failure,
        Some(CarteiraError::unknown_key("budgetOverveiw"))
    );
    assert_eq!(ctrl.call_count().await, 0);
}

#[tokio::test]
async fn keys_are_matched_exactly() {
    let (d, ctrl) = mock_dispatcher();
    for near_miss in ["Login", "login ", "LOGIN", ""] {
        let env = d.post(RequestDescriptor::new(RequestKey::new(near_miss))).await;
        assert_eq!(env.status, 404, "{near_miss:?} should not resolve");
    }
    assert_eq!(ctrl.call_count().await, 0);
}

#[tokio::test]
async fn fail_soft_sends_to_bare_base_url() {
    let (b, ctrl) = mock_builder();
    let d = b
        .unknown_key_policy(UnknownKeyPolicy::FailSoft)
        .build()
        .unwrap();
    ctrl.set_fallback(status(404, json!({ "detail": "Not found." })))
        .await;

    let env = d
        .get(RequestDescriptor::new(RequestKey::new("doesNotExist")).with_param("x", 1))
        .await;
    assert!(!env.success);
    assert_eq!(env.status, 404);
    assert_eq!(env.message.as_deref(), Some("Not Found"));
    // Indistinguishable from an ordinary backend 404.
    assert!(env.failure.is_none());

    let sent = ctrl.last_request().await.unwrap();
    assert_eq!(sent.endpoint, "");
    assert_eq!(sent.url, format!("{BASE_URL}?x=1"));
    assert_eq!(sent.headers.get("X-Request-Source"), Some("public"));
}
