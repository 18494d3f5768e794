pub mod auth;
pub mod budget;
pub mod crypto;
pub mod investments;
pub mod market;
pub mod system;
