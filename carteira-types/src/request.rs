use core::fmt;

use serde::{Deserialize, Serialize};

use crate::headers::HeaderSet;
use crate::key::{HttpMethod, RequestKey};

/// Flat scalar query parameter value. Nested values and arrays are not supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// String value, sent verbatim (form-encoded).
    Str(String),
    /// Integer value.
    Int(i64),
    /// Floating point value, formatted with `Display`.
    Float(f64),
    /// Boolean, sent as `true`/`false`.
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for QueryValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for QueryValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for QueryValue {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for QueryValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for QueryValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Caller-supplied input to a single dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// Logical request key.
    pub key: RequestKey,
    /// Optional JSON body (sent for `POST` only).
    pub body: Option<serde_json::Value>,
    /// Query parameters in insertion order.
    pub params: Vec<(String, QueryValue)>,
    /// Whether the bearer token should be attached.
    pub with_auth: bool,
}

impl RequestDescriptor {
    /// Start a descriptor for a key with no body, no params, and no auth.
    pub fn new(key: impl Into<RequestKey>) -> Self {
        Self {
            key: key.into(),
            body: None,
            params: Vec::new(),
            with_auth: false,
        }
    }

    /// Set the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append a query parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Toggle bearer-token attachment.
    #[must_use]
    pub const fn with_auth(mut self, yes: bool) -> Self {
        self.with_auth = yes;
        self
    }
}

/// What happened when the dispatcher considered attaching the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthOutcome {
    /// The descriptor did not request auth.
    NotRequested,
    /// `Authorization: Bearer <token>` was attached.
    Attached,
    /// Auth was requested but the token store was empty; the request goes out without it.
    NoToken,
}

/// Fully resolved request ready for a transport. Built fresh per call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    /// Key the request was resolved from.
    pub key: RequestKey,
    /// HTTP verb.
    pub method: HttpMethod,
    /// Absolute URL including query string.
    pub url: String,
    /// Registry path (empty when an unknown key was allowed through).
    pub endpoint: String,
    /// Final merged headers.
    pub headers: HeaderSet,
    /// JSON body, `POST` only.
    pub body: Option<serde_json::Value>,
    /// Result of token injection.
    pub auth: AuthOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_builder_keeps_param_order() {
        let d = RequestDescriptor::new("rankingPublic")
            .with_param("tipo", "fiis")
            .with_param("page", 2)
            .with_auth(true);
        assert_eq!(d.key.as_str(), "rankingPublic");
        assert_eq!(d.params[0].0, "tipo");
        assert_eq!(d.params[1].1, QueryValue::Int(2));
        assert!(d.with_auth);
    }

    #[test]
    fn query_values_stringify_like_scalars() {
        assert_eq!(QueryValue::from(2.5).to_string(), "2.5");
        assert_eq!(QueryValue::from(true).to_string(), "true");
        assert_eq!(QueryValue::from("acoes").to_string(), "acoes");
    }
}
