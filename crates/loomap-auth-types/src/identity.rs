//! Authenticated-user extractor.

use axum::extract::FromRequestParts;
use axum_extra::extract::CookieJar;
use http::request::Parts;
use http::{StatusCode, header};
use uuid::Uuid;

use crate::cookie::ACCESS_TOKEN_COOKIE;
use crate::token::validate_access_token;

/// State that can verify access tokens.
pub trait JwtSecret {
    fn jwt_secret(&self) -> &str;
}

/// The user behind a request's access token.
///
/// The token is read from `Authorization: Bearer <jwt>` first, then from the
/// `access_token_cookie` cookie. Returns 401 when neither holds a valid token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
}

fn bearer_token(parts: &Parts) -> Option<String> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim().to_owned())
        .filter(|t| !t.is_empty())
}

fn cookie_token(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(ACCESS_TOKEN_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|t| !t.is_empty())
}

impl<S> FromRequestParts<S> for Identity
where
    S: JwtSecret + Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract values synchronously, return a 'static async move block (avoids E0195).
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = bearer_token(parts)
            .or_else(|| cookie_token(parts))
            .and_then(|token| validate_access_token(&token, state.jwt_secret()).ok())
            .map(|info| info.user_id);

        async move {
            let user_id = user_id.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self { user_id })
        }
    }
}
