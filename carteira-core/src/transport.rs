//! The seam between the dispatcher and an HTTP stack.

use async_trait::async_trait;
use carteira_types::{RawResponse, ResolvedRequest, TransportError};

/// Issues one fully resolved request and returns the raw response.
///
/// Implementations must not retry, de-duplicate, or parse bodies: every call is an
/// independent network request and JSON parsing belongs to the dispatcher. Non-2xx
/// statuses are ordinary `Ok` responses; `Err` is reserved for transport failures.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short, stable name for logs and middleware introspection.
    fn name(&self) -> &'static str;

    /// Send `request` and wait for the complete response.
    async fn send(&self, request: &ResolvedRequest) -> Result<RawResponse, TransportError>;
}
