//! Carteira dispatches named backend requests and hands back uniform envelopes.
//!
//! Overview
//! - Callers describe a call with a [`RequestDescriptor`]: a logical key such as
//!   `"budgetOverview"`, an optional JSON body, flat query parameters, and whether the
//!   session token should be attached.
//! - The [`Dispatcher`] resolves the key through the [`EndpointRegistry`], builds the
//!   URL and headers, sends the call through its transport stack, and normalizes the
//!   answer into a [`ResponseEnvelope`].
//! - Nothing is thrown past the dispatcher. Transport failures collapse into
//!   `{ success: false, status: 500, message: "Network error" }` with the tagged cause
//!   in `failure`; backend errors keep their real status and body.
//!
//! Key behaviors and trade-offs
//! - Unknown keys: `UnknownKeyPolicy::Reject` (default) answers `404` without any I/O;
//!   `FailSoft` logs a warning and sends the request to the bare base URL.
//! - Auth: `with_auth(true)` attaches `Authorization: Bearer <token>` only when the
//!   token store holds one; otherwise the call goes out unauthenticated.
//! - `Content-Type: application/json` is forced on every request, including upload
//!   endpoints whose smart header asked for multipart.
//! - Caching is off unless configured. When enabled, successful `GET`s are cached per
//!   URL and header set for `CacheConfig::ttl_for(key)`. `POST`s never are, and a
//!   successful `POST` or a `logout` drops every cached entry.
//! - No retry, backoff, de-duplication, or cancellation. A deadline applies only when
//!   `request_timeout` is configured.
//!
//! Examples
//! ```rust,ignore
//! use carteira::{DispatchConfig, Dispatcher, RequestDescriptor, keys};
//!
//! let dispatcher = Dispatcher::builder()
//!     .config(DispatchConfig::from_env()?)
//!     .request_timeout(std::time::Duration::from_secs(10))
//!     .build()?;
//!
//! if dispatcher.login("alice", "secret").await {
//!     let user = dispatcher.get_user_data().await;
//!     let costs = dispatcher
//!         .get(RequestDescriptor::new(keys::BUDGET_COSTS).with_auth(true))
//!         .await;
//! }
//! let fiis = dispatcher.get_ranking("fiis").await;
//! ```
//!
//! See `carteira/examples/` for a runnable offline demonstration.
#![warn(missing_docs)]

mod api;
pub(crate) mod core;

pub use core::{Dispatcher, DispatcherBuilder};

pub use carteira_middleware::{CacheHandle, CacheMiddleware, TransportBuilder};
pub use carteira_mock::FixtureTransport;

#[cfg(feature = "http")]
pub use carteira_http::ReqwestTransport;

// Re-export core types for convenience
pub use carteira_core::{
    AuthOutcome, CacheConfig, CarteiraError, DispatchConfig, EndpointRegistry, FileTokenStore,
    HeaderPolicy, HeaderProfile, HeaderSet, HttpMethod, MemoryTokenStore, QueryValue,
    RequestDescriptor, RequestKey, ResolvedRequest, ResponseEnvelope, TokenStore, Transport,
    TransportError, UnknownKeyPolicy, keys,
};

/// Build a dispatcher from `cfg` with the default transport stack.
///
/// Uses the fixture transport when `cfg.use_mock` is set and the reqwest transport
/// otherwise, wrapped in the response cache when `cfg.cache` enables it.
///
/// # Errors
/// Returns `Config` if the configuration is unusable or the HTTP client cannot be built.
pub fn connect(cfg: DispatchConfig) -> Result<Dispatcher, CarteiraError> {
    Dispatcher::builder().config(cfg).build()
}
