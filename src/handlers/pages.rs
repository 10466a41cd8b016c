use axum::{
    extract::Query,
    http::HeaderMap,
    response::Html,
    Extension,
};
use serde::Deserialize;

use crate::backend::Session;
use crate::middleware::profile_header;
use crate::shell::DashboardShell;

/// GET /dashboard - the composition shell. The route guard already resolved
/// the session (extensions) and the profile (propagated header); this handler
/// performs no network calls of its own.
pub async fn dashboard_home(
    Extension(session): Extension<Session>,
    headers: HeaderMap,
) -> Html<String> {
    let profile = profile_header::from_headers(&headers);
    let shell = DashboardShell::new(profile, &session.email);
    Html(shell.render("<h1>Overview</h1>"))
}

/// GET /login - landing page the route guard redirects to.
pub async fn login_page() -> Html<&'static str> {
    Html(
        "<!doctype html>\n<html>\n<head><title>Sign in - Taskhub</title></head>\n\
         <body><main><h1>Sign in</h1>\
         <form method=\"post\" action=\"/auth/login\">\
         <input name=\"email\" type=\"email\" required>\
         <input name=\"password\" type=\"password\" required>\
         <button type=\"submit\">Sign in</button>\
         </form></main></body>\n</html>",
    )
}

#[derive(Debug, Deserialize)]
pub struct InviteErrorQuery {
    pub error: Option<String>,
}

/// GET /invite-error - generic landing page for invitation failures. The
/// query parameter classifies the failure without exposing internal detail.
pub async fn invite_error_page(Query(query): Query<InviteErrorQuery>) -> Html<String> {
    let message = match query.error.as_deref() {
        Some("server") => "Something went wrong on our side. Please try the invite link again.",
        _ => "This invite link could not be processed.",
    };

    Html(format!(
        "<!doctype html>\n<html>\n<head><title>Invite error - Taskhub</title></head>\n\
         <body><main><h1>Invite problem</h1><p>{message}</p>\
         <p><a href=\"/login\">Back to sign in</a></p></main></body>\n</html>"
    ))
}
