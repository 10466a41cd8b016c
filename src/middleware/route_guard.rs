use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::backend::session;
use crate::config;
use crate::state::AppState;

use super::profile_header::{self, PROFILE_HEADER};

/// Gate for protected path prefixes. Unauthenticated requests are redirected
/// to the login page before any profile lookup happens. Authenticated requests
/// get the profile resolved at most once per request chain: if the incoming
/// request already carries the cache header, no fetch is made; otherwise one
/// fetch runs and the encoded result is attached to both the request (for
/// downstream handlers) and the response (for upstream propagation).
///
/// A failed profile fetch is soft: the user is still authenticated, so the
/// request proceeds without the header and downstream treats the profile as
/// optional.
pub async fn route_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let site = &config::config().site;

    let path = request.uri().path();
    if !is_protected(path, &site.protected_prefixes) {
        return next.run(request).await;
    }

    let session = match session::resolve_session(state.backend.as_ref(), request.headers()).await {
        Ok(Some(session)) => session,
        Ok(None) => {
            tracing::debug!(path, "unauthenticated request to protected path");
            return Redirect::to(&site.login_path).into_response();
        }
        Err(e) => {
            // Cannot tell whether the caller is authenticated; send them
            // through login rather than guessing.
            tracing::error!(path, "session resolution failed: {}", e);
            return Redirect::to(&site.login_path).into_response();
        }
    };

    let already_resolved = request.headers().contains_key(PROFILE_HEADER);
    let mut propagated = None;

    if !already_resolved {
        match state.backend.fetch_profile(session.user_id).await {
            Ok(Some(profile)) => match profile_header::to_header_value(&profile) {
                Ok(value) => {
                    request.headers_mut().insert(PROFILE_HEADER, value.clone());
                    propagated = Some(value);
                }
                Err(e) => {
                    tracing::warn!(user_id = %session.user_id, "profile not encodable: {}", e);
                }
            },
            Ok(None) => {
                tracing::warn!(user_id = %session.user_id, "authenticated user has no profile");
            }
            Err(e) => {
                // Soft degradation: request continues without the header
                tracing::warn!(user_id = %session.user_id, "profile fetch failed: {}", e);
            }
        }
    }

    // Downstream handlers read the session from extensions instead of
    // resolving the token a second time
    request.extensions_mut().insert(session);

    let mut response = next.run(request).await;
    if let Some(value) = propagated {
        response.headers_mut().insert(PROFILE_HEADER, value);
    }
    response
}

/// A prefix only covers itself and paths under it; siblings that merely share
/// the leading characters stay public.
fn is_protected(path: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| {
        path.strip_prefix(prefix.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}
