use axum::http::HeaderMap;

use crate::error::ApiError;

use super::{Backend, BackendError, Session};

/// Cookie that carries the provider-issued access token.
pub const SESSION_COOKIE: &str = "th_access_token";

/// Pull the session token out of the Cookie header, if present.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get("cookie").or_else(|| headers.get("Cookie"))?;
    let cookies = cookie_header.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE && !value.trim().is_empty() {
            Some(value.trim().to_string())
        } else {
            None
        }
    })
}

/// Resolve the cookie-borne token against the identity provider.
/// No cookie or an invalid token both read as "no session".
pub async fn resolve_session(
    backend: &dyn Backend,
    headers: &HeaderMap,
) -> Result<Option<Session>, BackendError> {
    match session_token(headers) {
        Some(token) => backend.resolve_session(&token).await,
        None => Ok(None),
    }
}

/// Session gate for JSON API handlers: missing or invalid sessions become a
/// 401, never a redirect.
pub async fn require_session(
    backend: &dyn Backend,
    headers: &HeaderMap,
) -> Result<Session, ApiError> {
    resolve_session(backend, headers)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))
}
