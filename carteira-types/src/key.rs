use core::fmt;
use std::borrow::{Borrow, Cow};

use serde::{Deserialize, Serialize};

/// Logical name of a kind of request (e.g. `"login"`, `"budgetOverview"`).
///
/// Keys join the endpoint registry and the header policy. Any string is accepted;
/// the registry decides whether a key is known.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestKey(Cow<'static, str>);

impl RequestKey {
    /// Construct a key from a static name. Usable in `const` registry tables.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Construct a key from any owned or borrowed string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RequestKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RequestKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for RequestKey {
    fn from(s: &'static str) -> Self {
        Self::from_static(s)
    }
}

impl From<String> for RequestKey {
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Domain area that groups registry entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Area {
    /// Login, registration, token exchange, and account data.
    Auth,
    /// Monthly budget: costs, income, categories, and percentages.
    Budget,
    /// Portfolio positions, dividends, FIIs, and stocks.
    Investments,
    /// Public market data: rankings, quotes, indices.
    Market,
    /// Cryptocurrency tracking.
    Crypto,
    /// Health, versioning, settings, and notifications.
    System,
}

impl Area {
    /// Stable lowercase identifier for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Budget => "budget",
            Self::Investments => "investments",
            Self::Market => "market",
            Self::Crypto => "crypto",
            Self::System => "system",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP verb issued by the dispatcher. Only `GET` and `POST` are used by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// `GET`, no body.
    Get,
    /// `POST`, JSON body.
    Post,
}

impl HttpMethod {
    /// Uppercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged result of an endpoint registry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The key is registered with this relative path.
    Found(&'static str),
    /// The key is not registered.
    NotFound,
}

impl Lookup {
    /// Returns the path if found.
    #[must_use]
    pub const fn path(self) -> Option<&'static str> {
        match self {
            Self::Found(p) => Some(p),
            Self::NotFound => None,
        }
    }

    /// Returns true if the key was found.
    #[must_use]
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Found(_))
    }
}
