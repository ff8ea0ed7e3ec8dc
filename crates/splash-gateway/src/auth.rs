//! Session plumbing: a bare `username` cookie, as written by the
//! previous deployment of this service. The cookie is deliberately not
//! HttpOnly so the browser frontend can read it.

use crate::error::ApiError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use splash_core::Username;
use std::convert::Infallible;

pub const SESSION_COOKIE: &str = "username";

/// Extractor for endpoints that require a logged-in caller.
/// Rejects with 401 when the cookie is missing or unusable.
pub struct CurrentUser(pub Username);

/// Extractor for endpoints where a session is optional (legacy flat
/// documents allow unauthenticated deletes). Never rejects.
pub struct MaybeUser(pub Option<Username>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_username(&parts.headers)
            .map(CurrentUser)
            .ok_or(ApiError::Unauthorized)
    }
}

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(session_username(&parts.headers)))
    }
}

/// Reads the session username from the request's cookies, if any.
pub fn session_username(headers: &HeaderMap) -> Option<Username> {
    cookie_value(headers, SESSION_COOKIE).and_then(|value| Username::new(&value).ok())
}

/// `Set-Cookie` value that logs the session in.
pub fn login_cookie(username: &Username) -> String {
    format!("{SESSION_COOKIE}={username}; Path=/")
}

/// `Set-Cookie` value that clears the session.
pub fn logout_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; Max-Age=0")
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn reads_username_cookie() {
        let user = session_username(&headers("theme=dark; username=Alice")).unwrap();
        assert_eq!(user.as_str(), "alice");
    }

    #[test]
    fn missing_or_empty_cookie_is_none() {
        assert!(session_username(&HeaderMap::new()).is_none());
        assert!(session_username(&headers("username=")).is_none());
        assert!(session_username(&headers("theme=dark")).is_none());
    }

    #[test]
    fn cookie_values() {
        let user = Username::new("alice").unwrap();
        assert_eq!(login_cookie(&user), "username=alice; Path=/");
        assert_eq!(logout_cookie(), "username=; Path=/; Max-Age=0");
    }
}
