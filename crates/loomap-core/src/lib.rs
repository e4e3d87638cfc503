//! Cross-cutting service plumbing: configuration loading, tracing, request ids, health
//! endpoints and database helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod pagination;
pub mod serde;
pub mod tracing;
