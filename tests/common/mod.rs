#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::Router;
use chrono::{Duration, Utc};
use uuid::Uuid;

use taskhub_api::backend::{
    Backend, BackendError, ProfileWithTeam, Session, Team, TeamInvite, UserProfile,
};
use taskhub_api::backend::types::AccountType;
use taskhub_api::state::AppState;

#[derive(Debug, Clone)]
pub struct NotificationRow {
    pub user_id: Uuid,
    pub read: bool,
}

/// In-memory stand-in for the hosted backend. Counts remote calls so tests
/// can assert how often the middleware actually goes to the network.
#[derive(Default)]
pub struct MockBackend {
    pub sessions: HashMap<String, Session>,
    pub profiles: HashMap<Uuid, ProfileWithTeam>,
    pub invites: HashMap<String, TeamInvite>,
    pub notifications: Mutex<Vec<NotificationRow>>,
    pub resent_to: Mutex<Vec<String>>,

    pub resolve_calls: AtomicUsize,
    pub profile_fetches: AtomicUsize,

    pub fail_profiles: bool,
    pub fail_invites: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(mut self, token: &str, user_id: Uuid, email: &str) -> Self {
        self.sessions.insert(
            token.to_string(),
            Session {
                user_id,
                email: email.to_string(),
                expires_at: Utc::now() + Duration::hours(1),
            },
        );
        self
    }

    pub fn with_profile(mut self, profile: ProfileWithTeam) -> Self {
        self.profiles.insert(profile.profile.id, profile);
        self
    }

    pub fn with_invite(mut self, invite: TeamInvite) -> Self {
        self.invites.insert(invite.code.clone(), invite);
        self
    }

    pub fn with_notifications(self, user_id: Uuid, unread: usize, read: usize) -> Self {
        {
            let mut rows = self.notifications.lock().unwrap();
            rows.extend((0..unread).map(|_| NotificationRow { user_id, read: false }));
            rows.extend((0..read).map(|_| NotificationRow { user_id, read: true }));
        }
        self
    }

    pub fn unread_count(&self, user_id: Uuid) -> usize {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id && !n.read)
            .count()
    }

    pub fn profile_fetch_count(&self) -> usize {
        self.profile_fetches.load(Ordering::SeqCst)
    }

    pub fn resolve_call_count(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn resolve_session(&self, token: &str) -> Result<Option<Session>, BackendError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.sessions.get(token).cloned())
    }

    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<ProfileWithTeam>, BackendError> {
        self.profile_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_profiles {
            return Err(BackendError::UnexpectedStatus {
                status: 500,
                body: "mock profile failure".to_string(),
            });
        }
        Ok(self.profiles.get(&user_id).cloned())
    }

    async fn fetch_invite(&self, code: &str) -> Result<Option<TeamInvite>, BackendError> {
        if self.fail_invites {
            return Err(BackendError::UnexpectedStatus {
                status: 500,
                body: "mock invite failure".to_string(),
            });
        }
        Ok(self.invites.get(code).cloned())
    }

    async fn mark_notifications_read(&self, user_id: Uuid) -> Result<u64, BackendError> {
        let mut rows = self.notifications.lock().unwrap();
        let mut updated = 0;
        for row in rows.iter_mut().filter(|n| n.user_id == user_id && !n.read) {
            row.read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn resend_verification(&self, email: &str) -> Result<(), BackendError> {
        self.resent_to.lock().unwrap().push(email.to_string());
        Ok(())
    }
}

pub fn app_with(backend: MockBackend) -> (Router, Arc<MockBackend>) {
    let backend = Arc::new(backend);
    let app = taskhub_api::app(AppState::new(backend.clone()));
    (app, backend)
}

pub fn sample_profile(user_id: Uuid, account_type: AccountType, team: Option<Team>) -> ProfileWithTeam {
    ProfileWithTeam {
        profile: UserProfile {
            id: user_id,
            display_name: "Robin Vale".to_string(),
            email: "robin@example.com".to_string(),
            account_type,
            team_id: team.as_ref().map(|t| t.id),
        },
        team,
    }
}

pub fn sample_invite(code: &str, expires_in_hours: i64) -> TeamInvite {
    TeamInvite {
        code: code.to_string(),
        email: "invitee@example.com".to_string(),
        team_id: Uuid::new_v4(),
        team_name: "Acme Robotics".to_string(),
        created_at: Utc::now() - Duration::days(1),
        expires_at: Utc::now() + Duration::hours(expires_in_hours),
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("cookie", format!("th_access_token={}", token))
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("valid JSON body")
}

pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
