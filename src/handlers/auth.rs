use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::backend::session;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResendVerificationRequest {
    #[serde(default)]
    pub email: Option<String>,
}

/// POST /auth/resend-verification - ask the identity provider to resend the
/// verification email. Public by design: the caller may not have a session yet.
pub async fn resend_verification(
    State(state): State<AppState>,
    Json(body): Json<ResendVerificationRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = body
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::missing_field("email"))?;

    if !email.contains('@') {
        return Err(ApiError::validation_error(
            "Invalid email address",
            Some(std::collections::HashMap::from([(
                "email".to_string(),
                "Must be a valid email address".to_string(),
            )])),
        ));
    }

    state.backend.resend_verification(email).await?;

    Ok(Json(json!({ "success": true })))
}

/// GET /auth/check-profile - does the authenticated user have a profile row
/// yet? Registration creates it; this tells the client whether onboarding
/// still needs to run.
pub async fn check_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let session = session::require_session(state.backend.as_ref(), &headers).await?;

    let profile = state.backend.fetch_profile(session.user_id).await?;

    match profile {
        Some(profile) => Ok(Json(json!({ "exists": true, "profile": profile }))),
        None => Ok(Json(json!({ "exists": false }))),
    }
}
