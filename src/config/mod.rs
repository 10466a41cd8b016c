use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub backend: BackendConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Connection settings for the hosted backend (identity + row storage).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub service_key: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Public origin used when building absolute callback URLs.
    pub origin: String,
    pub login_path: String,
    pub invite_error_path: String,
    /// Path prefixes that require a valid session.
    pub protected_prefixes: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Environment-specific defaults first, then specific env vars win
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("BACKEND_BASE_URL") {
            self.backend.base_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("BACKEND_SERVICE_KEY") {
            self.backend.service_key = v;
        }
        if let Ok(v) = env::var("BACKEND_REQUEST_TIMEOUT_SECS") {
            self.backend.request_timeout_secs =
                v.parse().unwrap_or(self.backend.request_timeout_secs);
        }

        if let Ok(v) = env::var("SITE_ORIGIN") {
            self.site.origin = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("SITE_LOGIN_PATH") {
            self.site.login_path = v;
        }
        if let Ok(v) = env::var("SITE_INVITE_ERROR_PATH") {
            self.site.invite_error_path = v;
        }
        if let Ok(v) = env::var("PROTECTED_PREFIXES") {
            self.site.protected_prefixes = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            backend: BackendConfig {
                base_url: "http://localhost:54321".to_string(),
                service_key: String::new(),
                request_timeout_secs: 30,
            },
            site: SiteConfig {
                origin: "http://localhost:3000".to_string(),
                login_path: "/login".to_string(),
                invite_error_path: "/invite-error".to_string(),
                protected_prefixes: vec!["/dashboard".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            backend: BackendConfig {
                base_url: String::new(),
                service_key: String::new(),
                request_timeout_secs: 10,
            },
            site: SiteConfig {
                origin: "https://staging.taskhub.example.com".to_string(),
                login_path: "/login".to_string(),
                invite_error_path: "/invite-error".to_string(),
                protected_prefixes: vec!["/dashboard".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            backend: BackendConfig {
                base_url: String::new(),
                service_key: String::new(),
                request_timeout_secs: 10,
            },
            site: SiteConfig {
                origin: "https://app.taskhub.example.com".to_string(),
                login_path: "/login".to_string(),
                invite_error_path: "/invite-error".to_string(),
                protected_prefixes: vec!["/dashboard".to_string()],
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
