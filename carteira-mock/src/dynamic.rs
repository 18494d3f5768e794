use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use carteira_core::{HttpMethod, RawResponse, ResolvedRequest, Transport, TransportError};
use serde_json::json;
use tokio::sync::Mutex;

/// Scripted behavior for one `(method, endpoint)` pair.
#[derive(Clone)]
pub enum MockBehavior {
    /// Answer with this response.
    Return(RawResponse),
    /// Fail with this transport error.
    Fail(TransportError),
    /// Never complete. Pair with a request timeout to exercise timeout handling.
    Hang,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<(HttpMethod, String), MockBehavior>,
    fallback: Option<MockBehavior>,
    requests: Vec<ResolvedRequest>,
}

/// A handle to control a `DynamicMockTransport` from tests.
#[derive(Clone)]
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for requests with `method` to `endpoint` (the registry path).
    pub async fn set_behavior(
        &self,
        method: HttpMethod,
        endpoint: impl Into<String>,
        behavior: MockBehavior,
    ) {
        let mut guard = self.state.lock().await;
        guard.rules.insert((method, endpoint.into()), behavior);
    }

    /// Behavior for requests that match no rule. Without one they get a JSON `404`.
    pub async fn set_fallback(&self, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.fallback = Some(behavior);
    }

    /// Every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<ResolvedRequest> {
        let guard = self.state.lock().await;
        guard.requests.clone()
    }

    /// Most recent request, if any.
    pub async fn last_request(&self) -> Option<ResolvedRequest> {
        let guard = self.state.lock().await;
        guard.requests.last().cloned()
    }

    /// Number of requests received so far.
    pub async fn call_count(&self) -> usize {
        let guard = self.state.lock().await;
        guard.requests.len()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.fallback = None;
        guard.requests.clear();
    }
}

/// A transport that defers all behavior to an external controller.
pub struct DynamicMockTransport {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockTransport {
    /// Create a new dynamic mock transport and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn Transport>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn Transport>, controller)
    }
}

#[async_trait]
impl Transport for DynamicMockTransport {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn send(&self, request: &ResolvedRequest) -> Result<RawResponse, TransportError> {
        // Record and snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push(request.clone());
            guard
                .rules
                .get(&(request.method, request.endpoint.clone()))
                .or(guard.fallback.as_ref())
                .cloned()
        };

        match behavior {
            Some(MockBehavior::Return(resp)) => Ok(resp),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Ok(crate::json_response(404, &json!({ "detail": "Not found." }))),
        }
    }
}
