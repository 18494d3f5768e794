use std::time::Duration;

use carteira_core::TransportError;

/// Classify a reqwest failure.
///
/// `timeout` is the deadline the client was built with, reported back in `Timeout`.
#[must_use]
pub fn map_reqwest_error(err: &reqwest::Error, timeout: Option<Duration>) -> TransportError {
    if err.is_timeout() {
        return timeout.map_or(TransportError::Timeout { after_ms: None }, TransportError::timeout);
    }
    if err.is_connect() || (err.is_request() && !err.is_builder()) {
        return TransportError::ConnectionFailed(err.to_string());
    }
    if err.is_body() || err.is_decode() {
        return TransportError::InvalidResponse(err.to_string());
    }
    TransportError::Other(err.to_string())
}
