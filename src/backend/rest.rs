use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use crate::config::BackendConfig;

use super::{Backend, BackendError, ProfileWithTeam, Session, TeamInvite};

/// Client for the hosted backend's REST surface: identity endpoints under
/// `/auth/v1`, row API under `/rest/v1`. All requests carry the privileged
/// service key; row-level authorization stays with the backend.
pub struct RestBackend {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl RestBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        if config.base_url.is_empty() {
            return Err(BackendError::NotConfigured("BACKEND_BASE_URL"));
        }
        if config.service_key.is_empty() {
            return Err(BackendError::NotConfigured("BACKEND_SERVICE_KEY"));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| BackendError::MalformedPayload(format!("bad endpoint url: {}", e)))
    }

    /// Rows are filtered PostgREST-style: `column=eq.value` query pairs.
    fn rows_endpoint(&self, table: &str, filters: &[(&str, String)]) -> Result<Url, BackendError> {
        let mut url = self.endpoint(&format!("/rest/v1/{}", table))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (column, value) in filters {
                pairs.append_pair(column, value);
            }
        }
        Ok(url)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn unexpected(response: reqwest::Response) -> BackendError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        BackendError::UnexpectedStatus { status, body }
    }
}

#[derive(Debug, Deserialize)]
struct SessionPayload {
    id: Uuid,
    email: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct InviteRow {
    code: String,
    email: String,
    team_id: Uuid,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    team: Option<TeamNameRow>,
}

#[derive(Debug, Deserialize)]
struct TeamNameRow {
    name: String,
}

#[derive(Debug, Deserialize)]
struct UpdatedRow {
    #[allow(dead_code)]
    id: Uuid,
}

#[async_trait]
impl Backend for RestBackend {
    async fn resolve_session(&self, token: &str) -> Result<Option<Session>, BackendError> {
        let url = self.endpoint("/auth/v1/user")?;
        let response = self
            .client
            .get(url)
            .header("apikey", &self.service_key)
            .bearer_auth(token)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let payload: SessionPayload = response
                    .json()
                    .await
                    .map_err(|e| BackendError::MalformedPayload(e.to_string()))?;
                Ok(Some(Session {
                    user_id: payload.id,
                    email: payload.email,
                    expires_at: payload.expires_at,
                }))
            }
            // Unknown, revoked, or expired tokens all read as "no session"
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Ok(None),
            _ => Err(Self::unexpected(response).await),
        }
    }

    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<ProfileWithTeam>, BackendError> {
        let url = self.rows_endpoint(
            "profiles",
            &[
                ("id", format!("eq.{}", user_id)),
                ("select", "*,team:teams(id,name)".to_string()),
            ],
        )?;

        let response = self.authed(self.client.get(url)).send().await?;
        if !response.status().is_success() {
            return Err(Self::unexpected(response).await);
        }

        let mut rows: Vec<ProfileWithTeam> = response
            .json()
            .await
            .map_err(|e| BackendError::MalformedPayload(e.to_string()))?;

        // id is the primary key, so at most one row comes back
        Ok(rows.pop())
    }

    async fn fetch_invite(&self, code: &str) -> Result<Option<TeamInvite>, BackendError> {
        let url = self.rows_endpoint(
            "team_invites",
            &[
                ("code", format!("eq.{}", code)),
                ("select", "code,email,team_id,created_at,expires_at,team:teams(name)".to_string()),
            ],
        )?;

        let response = self.authed(self.client.get(url)).send().await?;
        if !response.status().is_success() {
            return Err(Self::unexpected(response).await);
        }

        let mut rows: Vec<InviteRow> = response
            .json()
            .await
            .map_err(|e| BackendError::MalformedPayload(e.to_string()))?;

        let Some(row) = rows.pop() else {
            return Ok(None);
        };

        let team = row
            .team
            .ok_or_else(|| BackendError::MalformedPayload("invite row missing team join".into()))?;

        Ok(Some(TeamInvite {
            code: row.code,
            email: row.email,
            team_id: row.team_id,
            team_name: team.name,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }))
    }

    async fn mark_notifications_read(&self, user_id: Uuid) -> Result<u64, BackendError> {
        let url = self.rows_endpoint(
            "notifications",
            &[
                ("user_id", format!("eq.{}", user_id)),
                ("read", "eq.false".to_string()),
            ],
        )?;

        let response = self
            .authed(self.client.patch(url))
            .header("Prefer", "return=representation")
            .json(&json!({ "read": true }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::unexpected(response).await);
        }

        let rows: Vec<UpdatedRow> = response
            .json()
            .await
            .map_err(|e| BackendError::MalformedPayload(e.to_string()))?;

        Ok(rows.len() as u64)
    }

    async fn resend_verification(&self, email: &str) -> Result<(), BackendError> {
        let url = self.endpoint("/auth/v1/resend")?;
        let response = self
            .authed(self.client.post(url))
            .json(&json!({ "type": "signup", "email": email }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::unexpected(response).await);
        }

        Ok(())
    }
}
