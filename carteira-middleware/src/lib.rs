#![doc = include_str!("../README.md")]
//! carteira-middleware
//!
//! Re-exports for transport middleware wrappers.

mod builder;
mod cache;

pub use crate::builder::TransportBuilder;
pub use crate::cache::{CacheHandle, CacheMiddleware, CachingTransport};
