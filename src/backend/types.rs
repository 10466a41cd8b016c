use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Provider-issued proof of authentication, carried via cookie.
/// Read-only to this service; the provider owns its lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Single,
    TeamMember,
    TeamOwner,
}

/// Application-level user record, distinct from the session.
/// Invariant: exactly one profile per authenticated user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub account_type: AccountType,
    #[serde(default)]
    pub team_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
}

/// Profile joined with its optional team, as the dashboard consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileWithTeam {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(default)]
    pub team: Option<Team>,
}

impl ProfileWithTeam {
    pub fn is_team_owner(&self) -> bool {
        self.profile.account_type == AccountType::TeamOwner
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamInvite {
    pub code: String,
    pub email: String,
    pub team_id: Uuid,
    pub team_name: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TeamInvite {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
