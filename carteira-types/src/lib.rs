//! Carteira-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod headers;
mod key;
mod middleware;
mod request;
mod response;

pub use config::{CacheConfig, DispatchConfig, UnknownKeyPolicy};
pub use error::{CarteiraError, TransportError};
pub use headers::{HeaderProfile, HeaderSet};
pub use key::{Area, HttpMethod, Lookup, RequestKey};
pub use middleware::{MiddlewareLayer, MiddlewareStack};
pub use request::{AuthOutcome, QueryValue, RequestDescriptor, ResolvedRequest};
pub use response::{CallMeta, NETWORK_ERROR_MESSAGE, RawOutcome, RawResponse, ResponseEnvelope};
