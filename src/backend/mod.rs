pub mod rest;
pub mod session;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

pub use types::{AccountType, ProfileWithTeam, Session, Team, TeamInvite, UserProfile};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("malformed backend payload: {0}")]
    MalformedPayload(String),

    #[error("backend not configured: {0}")]
    NotConfigured(&'static str),
}

/// The seam between request handlers and the hosted backend service.
/// Every remote operation the app performs goes through here, which is
/// also what lets tests substitute an in-memory implementation.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Validate an access token with the identity provider.
    /// `None` means the token is absent-equivalent: unknown, revoked, or expired.
    async fn resolve_session(&self, token: &str) -> Result<Option<Session>, BackendError>;

    /// Fetch a user's profile joined with its team, if any.
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<ProfileWithTeam>, BackendError>;

    /// Look up a team invite by its unique code. Expiry is NOT checked here;
    /// callers decide how expired invites surface to clients.
    async fn fetch_invite(&self, code: &str) -> Result<Option<TeamInvite>, BackendError>;

    /// Flip the read flag on all unread notifications belonging to `user_id`.
    /// Returns the number of rows updated. Rows of other users are untouched;
    /// the backend's row-level rules enforce that independently of the filter.
    async fn mark_notifications_read(&self, user_id: Uuid) -> Result<u64, BackendError>;

    /// Ask the identity provider to resend the verification email.
    async fn resend_verification(&self, email: &str) -> Result<(), BackendError>;
}
