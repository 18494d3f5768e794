//! Caller-facing flows on top of [`crate::Dispatcher`].
//!
//! Each operation has a default-key form and a `_with_key` form for deployments that
//! register the same flow under a different logical key.

mod auth;
mod ranking;
mod user;
