// Re-export helpers so tests can `use helpers::*;`
#![allow(dead_code)]

use std::sync::Arc;

use carteira::{Dispatcher, DispatcherBuilder, MemoryTokenStore, TokenStore};
use carteira_core::RawResponse;
use carteira_mock::{DynamicMockController, DynamicMockTransport};
use serde_json::Value;

pub use carteira_mock::{MockBehavior, json_response};

pub const BASE_URL: &str = "http://backend.test";

/// Builder wired to a fresh dynamic mock, with caching off.
pub fn mock_builder() -> (DispatcherBuilder, DynamicMockController) {
    let (transport, ctrl) = DynamicMockTransport::new_with_controller("dyn");
    let builder = Dispatcher::builder()
        .base_url(BASE_URL)
        .api_key("test-key")
        .client_version("9.9.9")
        .without_cache()
        .transport(transport);
    (builder, ctrl)
}

pub fn mock_dispatcher() -> (Dispatcher, DynamicMockController) {
    let (b, ctrl) = mock_builder();
    (b.build().unwrap(), ctrl)
}

/// Dispatcher whose token store already holds `token`.
pub fn mock_dispatcher_with_token(
    token: &str,
) -> (Dispatcher, DynamicMockController, Arc<dyn TokenStore>) {
    let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_token(token));
    let (b, ctrl) = mock_builder();
    let d = b.token_store(Arc::clone(&store)).build().unwrap();
    (d, ctrl, store)
}

pub fn ok(body: Value) -> MockBehavior {
    MockBehavior::Return(json_response(200, &body))
}

pub fn status(code: u16, body: Value) -> MockBehavior {
    MockBehavior::Return(json_response(code, &body))
}

pub fn raw(status: u16, status_text: &str, body: &[u8]) -> MockBehavior {
    MockBehavior::Return(RawResponse {
        status,
        status_text: status_text.to_string(),
        headers: carteira::HeaderSet::new(),
        body: body.to_vec(),
    })
}
