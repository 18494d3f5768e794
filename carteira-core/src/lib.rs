//! carteira-core
//!
//! Core tables, traits, and pure helpers shared across the carteira workspace.
//!
//! - `registry`: the `EndpointRegistry` lookup table.
//! - `headers`: the `HeaderPolicy` that selects public/private header profiles.
//! - `normalize`: the response normalizer.
//! - `session`: the `TokenStore` trait and its stores.
//! - `transport`: the `Transport` trait implemented by HTTP stacks and mocks.
//!
//! Registry and header tables are built once and only read afterwards, so a single
//! instance can be shared by every call.
#![warn(missing_docs)]

/// Public/private header profiles and smart header composition.
pub mod headers;
/// Middleware trait implemented by transport wrappers.
pub mod middleware;
/// Response normalization and body parsing.
pub mod normalize;
/// Query-string serialization.
pub mod query;
/// Logical key to endpoint path registry.
pub mod registry;
/// Session token stores.
pub mod session;
/// Transport trait.
pub mod transport;

pub use headers::{HeaderPolicy, smart_headers};
pub use middleware::Middleware;
pub use normalize::{normalize, parse_body};
pub use query::{append_query, serialize_query};
pub use registry::{EndpointRegistry, keys};
pub use session::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use transport::Transport;

pub use carteira_types::*;
