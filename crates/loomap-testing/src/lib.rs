//! Test utilities for Loomap services.
//!
//! Provides `MockAuth` for minting request credentials.
//! Import in `#[cfg(test)]` blocks and integration tests only, never in production code.

pub mod auth;

/// JWT secret shared by test app states and [`auth::MockAuth`].
pub const TEST_JWT_SECRET: &str = "loomap-test-secret";
