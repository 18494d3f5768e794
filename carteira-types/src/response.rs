use serde::{Deserialize, Serialize};

use crate::error::{CarteiraError, TransportError};
use crate::headers::HeaderSet;
use crate::key::{HttpMethod, RequestKey};

/// Message carried by every transport-failure envelope.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// Raw transport output, before JSON parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Canonical reason phrase (e.g. `"Not Found"`).
    pub status_text: String,
    /// Response headers.
    pub headers: HeaderSet,
    /// Undecoded body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Build a response with a JSON body and no headers.
    #[must_use]
    pub fn json(status: u16, status_text: impl Into<String>, body: &serde_json::Value) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers: HeaderSet::new().with("Content-Type", "application/json"),
            body: body.to_string().into_bytes(),
        }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Normalizer input: a response whose body has already been parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawOutcome {
    /// Whether the status was 2xx.
    pub ok: bool,
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase.
    pub status_text: String,
    /// Parsed JSON body; `None` for an empty body.
    pub body: Option<serde_json::Value>,
}

/// Metadata describing the call that produced an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallMeta {
    /// Logical request key.
    pub key: RequestKey,
    /// HTTP verb.
    pub method: HttpMethod,
    /// Registry path.
    pub endpoint: String,
    /// Whether auth was requested.
    pub with_auth: bool,
}

/// Uniform outcome handed back to callers. Nothing is thrown past the dispatcher;
/// callers branch on `success`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// True for a 2xx response with a parsable body.
    pub success: bool,
    /// HTTP status, or 500 for transport failures.
    pub status: u16,
    /// Parsed body, when one was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Human-readable message for unsuccessful outcomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Structured cause for failures that never reached the normalizer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<CarteiraError>,
}

impl ResponseEnvelope {
    /// Fixed envelope for transport-level failures: `success:false, status:500, "Network error"`.
    /// The tagged cause is kept in `failure`.
    #[must_use]
    pub fn from_transport_error(err: TransportError) -> Self {
        Self {
            success: false,
            status: 500,
            data: None,
            message: Some(NETWORK_ERROR_MESSAGE.to_string()),
            failure: Some(CarteiraError::Transport(err)),
        }
    }

    /// Envelope for a key the registry does not know; no request was issued.
    #[must_use]
    pub fn unknown_key(key: &RequestKey) -> Self {
        let err = CarteiraError::unknown_key(key.as_str());
        Self {
            success: false,
            status: 404,
            data: None,
            message: Some(err.to_string()),
            failure: Some(err),
        }
    }

    /// Returns the transport error, if this envelope was produced by one.
    #[must_use]
    pub const fn transport_error(&self) -> Option<&TransportError> {
        match &self.failure {
            Some(CarteiraError::Transport(e)) => Some(e),
            _ => None,
        }
    }

    /// Consume the envelope and return `data` only when successful.
    #[must_use]
    pub fn into_data(self) -> Option<serde_json::Value> {
        if self.success { self.data } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failure_envelope_is_fixed_shape() {
        let env = ResponseEnvelope::from_transport_error(TransportError::ConnectionFailed(
            "refused".into(),
        ));
        assert!(!env.success);
        assert_eq!(env.status, 500);
        assert_eq!(env.message.as_deref(), Some("Network error"));
        assert!(matches!(
            env.transport_error(),
            Some(TransportError::ConnectionFailed(_))
        ));
    }

    #[test]
    fn into_data_drops_failed_bodies() {
        let env = ResponseEnvelope {
            success: false,
            status: 400,
            data: Some(serde_json::json!({"detail": "bad"})),
            message: Some("Bad Request".into()),
            failure: None,
        };
        assert_eq!(env.into_data(), None);
    }
}
