//! Authentication primitives for the Loomap API.
//!
//! Provides JWT issuing and validation, the session cookie builders, password hashing and
//! the `Identity` extractor.

pub mod cookie;
pub mod identity;
pub mod password;
pub mod token;
