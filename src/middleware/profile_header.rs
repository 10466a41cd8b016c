use axum::http::{HeaderMap, HeaderValue};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use thiserror::Error;

use crate::backend::ProfileWithTeam;

/// Request-scoped memoization of the resolved profile: base64-encoded JSON.
/// Absence means "not yet resolved", never "user has no profile". The value
/// is derived, best-effort state and must not be trusted across requests.
pub const PROFILE_HEADER: &str = "x-profile-cache";

#[derive(Debug, Error)]
pub enum ProfileHeaderError {
    #[error("profile header is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("profile header payload is not a valid profile: {0}")]
    Json(#[from] serde_json::Error),

    #[error("profile header is not visible ASCII")]
    NonAscii,
}

/// Serialize a profile into a header-safe token.
pub fn encode(profile: &ProfileWithTeam) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(profile)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Reverse of [`encode`]. Failure here is never fatal: callers treat a bad
/// token as "profile unavailable" and re-fetch if they need the data.
pub fn decode(token: &str) -> Result<ProfileWithTeam, ProfileHeaderError> {
    let bytes = URL_SAFE_NO_PAD.decode(token)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Decode the profile header out of a header map, treating a missing or
/// malformed header as absent. Malformed headers are logged and dropped
/// rather than propagated (fail closed).
pub fn from_headers(headers: &HeaderMap) -> Option<ProfileWithTeam> {
    let value = headers.get(PROFILE_HEADER)?;
    let token = match value.to_str() {
        Ok(t) => t,
        Err(_) => {
            tracing::warn!("profile cache header is not visible ASCII; ignoring");
            return None;
        }
    };

    match decode(token) {
        Ok(profile) => Some(profile),
        Err(e) => {
            tracing::warn!("undecodable profile cache header ignored: {}", e);
            None
        }
    }
}

pub fn to_header_value(profile: &ProfileWithTeam) -> Result<HeaderValue, ProfileHeaderError> {
    let token = encode(profile)?;
    HeaderValue::from_str(&token).map_err(|_| ProfileHeaderError::NonAscii)
}
