//! Session cookie builders.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::token::ACCESS_TOKEN_EXP;

/// Cookie name for the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token_cookie";

/// Set the access-token cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use loomap_auth_types::cookie::{set_access_token_cookie, ACCESS_TOKEN_COOKIE};
///
/// let jar = set_access_token_cookie(CookieJar::new(), "token_value".to_string(), false);
/// let cookie = jar.get(ACCESS_TOKEN_COOKIE).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(900)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(!cookie.secure().unwrap_or(false));
/// ```
pub fn set_access_token_cookie(jar: CookieJar, value: String, secure: bool) -> CookieJar {
    let cookie = Cookie::build((ACCESS_TOKEN_COOKIE, value))
        .path("/")
        .max_age(Duration::seconds(ACCESS_TOKEN_EXP as i64))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the access-token cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use loomap_auth_types::cookie::{clear_access_token_cookie, set_access_token_cookie, ACCESS_TOKEN_COOKIE};
///
/// let jar = set_access_token_cookie(CookieJar::new(), "a".to_string(), true);
/// let jar = clear_access_token_cookie(jar, true);
/// let cookie = jar.get(ACCESS_TOKEN_COOKIE).unwrap();
/// assert_eq!(cookie.value(), "");
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_access_token_cookie(jar: CookieJar, secure: bool) -> CookieJar {
    let cookie = Cookie::build((ACCESS_TOKEN_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
