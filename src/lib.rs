pub mod backend;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod shell;
pub mod state;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use state::AppState;

/// Assemble the full router. Tests call this with a mock backend in the state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // Landing pages
        .route("/login", get(handlers::pages::login_page))
        .route("/invite-error", get(handlers::pages::invite_error_page))
        // Dashboard shell (protected by the route guard)
        .route("/dashboard", get(handlers::pages::dashboard_home))
        // Invitation flow
        .merge(invite_routes())
        // JSON API
        .merge(api_routes())
        // Global middleware
        .layer(from_fn_with_state(state.clone(), middleware::route_guard))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn invite_routes() -> Router<AppState> {
    use handlers::invite;

    Router::new()
        .route("/invite/validate", get(invite::validate))
        .route("/invite/accept", get(invite::accept))
        .route("/invite/existing/accept", get(invite::accept_existing))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications/mark-all-read", post(handlers::notifications::mark_all_read))
        .route("/auth/resend-verification", post(handlers::auth::resend_verification))
        .route("/auth/check-profile", get(handlers::auth::check_profile))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Taskhub API",
            "version": version,
            "endpoints": {
                "home": "/ (public)",
                "pages": "/login, /invite-error (public), /dashboard (session required)",
                "invite": "/invite/validate, /invite/accept, /invite/existing/accept (public)",
                "auth": "/auth/resend-verification (public), /auth/check-profile (session required)",
                "notifications": "/notifications/mark-all-read (session required)",
            }
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
