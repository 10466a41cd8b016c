use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config;
use crate::error::ApiError;
use crate::state::AppState;

/// One message for unknown, expired, and absent codes. Which condition failed
/// is deliberately not revealed to the caller.
const INVALID_INVITE: &str = "This invite is invalid or has expired";

#[derive(Debug, Deserialize)]
pub struct InviteQuery {
    pub code: Option<String>,
}

/// GET /invite/validate?code=... - pure read, safely repeatable
pub async fn validate(
    State(state): State<AppState>,
    Query(query): Query<InviteQuery>,
) -> Json<Value> {
    let Some(code) = query.code.filter(|c| !c.trim().is_empty()) else {
        return Json(json!({ "valid": false, "error": INVALID_INVITE }));
    };

    let invite = match state.backend.fetch_invite(code.trim()).await {
        Ok(invite) => invite,
        Err(e) => {
            // Never let a backend failure escape the handler boundary
            tracing::error!(code = code.trim(), "invite validation failed: {}", e);
            return Json(json!({ "valid": false, "error": "Unable to validate invite" }));
        }
    };

    match invite {
        Some(invite) if !invite.is_expired(Utc::now()) => Json(json!({
            "valid": true,
            "invite": {
                "email": invite.email,
                "team_name": invite.team_name,
                "team_id": invite.team_id,
                "code": invite.code,
                "expires_at": invite.expires_at,
            }
        })),
        _ => Json(json!({ "valid": false, "error": INVALID_INVITE })),
    }
}

/// GET /invite/accept?code=... - normalize the code into a path segment and
/// hand off to the downstream accept handler. Single-use enforcement lives
/// there, not here; this endpoint performs no reads or writes.
pub async fn accept(Query(query): Query<InviteQuery>) -> Result<Response, ApiError> {
    redirect_to_accept(query, "/invite")
}

/// GET /invite/existing/accept?code=... - same normalization for users who
/// already have an account.
pub async fn accept_existing(Query(query): Query<InviteQuery>) -> Result<Response, ApiError> {
    redirect_to_accept(query, "/invite/existing")
}

fn redirect_to_accept(query: InviteQuery, base: &str) -> Result<Response, ApiError> {
    // A missing code is a caller mistake and gets a 400, never a redirect
    let code = query
        .code
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::missing_field("code"))?;

    match path_segment(code) {
        Some(segment) => Ok(Redirect::to(&format!("{}/{}", base, segment)).into_response()),
        None => {
            // Browser entry point: classify the failure in the query string,
            // keep the detail in the log
            tracing::error!(code, "invite code cannot form a path segment");
            let error_page = format!("{}?error=server", config::config().site.invite_error_path);
            Ok(Redirect::to(&error_page).into_response())
        }
    }
}

/// Invite codes are issued URL-safe; anything else cannot be placed into the
/// canonical `/invite/{code}` path.
fn path_segment(code: &str) -> Option<&str> {
    if code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        Some(code)
    } else {
        None
    }
}
