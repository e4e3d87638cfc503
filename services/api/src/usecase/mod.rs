pub mod auth;
pub mod bathroom;
pub mod geocode;
pub mod review;
pub mod seed;
pub mod user;
