use axum::{extract::State, http::HeaderMap, Json};
use serde_json::{json, Value};

use crate::backend::session;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /notifications/mark-all-read - flip the read flag on every unread
/// notification belonging to the caller. Scoped by the session's user id, so
/// other users' rows are never touched.
pub async fn mark_all_read(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let session = session::require_session(state.backend.as_ref(), &headers).await?;

    let updated = state.backend.mark_notifications_read(session.user_id).await?;
    tracing::debug!(user_id = %session.user_id, updated, "marked notifications read");

    Ok(Json(json!({ "success": true, "updated": updated })))
}
