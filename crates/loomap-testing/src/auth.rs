//! Mock auth helpers for integration tests.
//!
//! `MockAuth` signs a real access token with [`TEST_JWT_SECRET`] so requests pass the
//! `Identity` extractor without going through login.

use axum::http::{HeaderMap, HeaderName, HeaderValue, header};
use uuid::Uuid;

use loomap_auth_types::cookie::ACCESS_TOKEN_COOKIE;
use loomap_auth_types::token::issue_access_token;

use crate::TEST_JWT_SECRET;

/// Configurable identity attached to test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub token: String,
}

impl MockAuth {
    pub fn new(user_id: Uuid) -> Self {
        let (token, _) = issue_access_token(user_id, TEST_JWT_SECRET).unwrap();
        Self { user_id, token }
    }

    pub fn random() -> Self {
        Self::new(Uuid::new_v4())
    }

    /// `Authorization: Bearer` header pair.
    pub fn bearer(&self) -> (HeaderName, HeaderValue) {
        (
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token)).unwrap(),
        )
    }

    /// `Cookie` header pair carrying the access-token cookie.
    pub fn cookie(&self) -> (HeaderName, HeaderValue) {
        (
            header::COOKIE,
            HeaderValue::from_str(&format!("{ACCESS_TOKEN_COOKIE}={}", self.token)).unwrap(),
        )
    }

    /// Headers with the bearer token set.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        let (name, value) = self.bearer();
        map.insert(name, value);
        map
    }
}
