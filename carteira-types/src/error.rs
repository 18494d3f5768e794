use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Distinguishable ways the transport can fail before a usable response exists.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportError {
    /// The call did not complete within the configured deadline.
    #[error("request timed out after {after_ms:?}ms")]
    Timeout {
        /// Deadline that elapsed, if known.
        after_ms: Option<u64>,
    },

    /// DNS failure, connection refusal, TLS failure, or a dropped connection.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// A response arrived but its body could not be read or parsed.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Anything else the HTTP stack reported.
    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Helper: build a `Timeout` from a deadline.
    #[must_use]
    pub fn timeout(after: std::time::Duration) -> Self {
        Self::Timeout {
            after_ms: Some(u64::try_from(after.as_millis()).unwrap_or(u64::MAX)),
        }
    }

    /// Short label for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::ConnectionFailed(_) => "connection-failed",
            Self::InvalidResponse(_) => "invalid-response",
            Self::Other(_) => "other",
        }
    }
}

/// Unified error type for the carteira workspace.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CarteiraError {
    /// Invalid configuration value (e.g. a malformed environment variable).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The session token store could not be read or written.
    #[error("token storage failed: {0}")]
    Storage(String),

    /// The logical request key is not in the endpoint registry.
    #[error("unknown request key: {key}")]
    UnknownKey {
        /// The key that was looked up.
        key: String,
    },

    /// The transport failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl CarteiraError {
    /// Helper: build an `UnknownKey` error.
    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey { key: key.into() }
    }

    /// Helper: build a `Storage` error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
