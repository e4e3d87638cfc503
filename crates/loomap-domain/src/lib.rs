//! Domain types and validation rules for the Loomap service.
//!
//! This crate contains only pure types with no framework dependencies.

pub mod error;
pub mod geo;
pub mod input;
pub mod location;
pub mod pagination;
pub mod rating;

pub use error::ValidationError;
