mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use common::{app_with, body_json, sample_profile, MockBackend};
use taskhub_api::backend::types::AccountType;

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_with_cookie(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("cookie", format!("th_access_token={}", token))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn mark_all_read_requires_a_session() {
    let (app, _backend) = app_with(MockBackend::new());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/notifications/mark-all-read")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn mark_all_read_touches_only_the_callers_notifications() {
    let caller = Uuid::new_v4();
    let other = Uuid::new_v4();
    let backend = MockBackend::new()
        .with_session("tok-1", caller, "robin@example.com")
        .with_notifications(caller, 3, 1)
        .with_notifications(other, 2, 0);
    let (app, backend) = app_with(backend);

    let response = app
        .oneshot(post_with_cookie("/notifications/mark-all-read", "tok-1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["updated"], 3);

    assert_eq!(backend.unread_count(caller), 0);
    assert_eq!(backend.unread_count(other), 2);
}

#[tokio::test]
async fn mark_all_read_is_idempotent() {
    let caller = Uuid::new_v4();
    let backend = MockBackend::new()
        .with_session("tok-1", caller, "robin@example.com")
        .with_notifications(caller, 2, 0);
    let (app, _backend) = app_with(backend);

    let first = app
        .clone()
        .oneshot(post_with_cookie("/notifications/mark-all-read", "tok-1"))
        .await
        .unwrap();
    assert_eq!(body_json(first).await["updated"], 2);

    let second = app
        .oneshot(post_with_cookie("/notifications/mark-all-read", "tok-1"))
        .await
        .unwrap();
    assert_eq!(body_json(second).await["updated"], 0);
}

#[tokio::test]
async fn resend_verification_requires_an_email() {
    let (app, _backend) = app_with(MockBackend::new());

    let response = app
        .oneshot(post_json("/auth/resend-verification", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["field_errors"]["email"], "This field is required");
}

#[tokio::test]
async fn resend_verification_rejects_implausible_email() {
    let (app, backend) = app_with(MockBackend::new());

    let response = app
        .oneshot(post_json(
            "/auth/resend-verification",
            json!({ "email": "not-an-email" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(backend.resent_to.lock().unwrap().is_empty());
}

#[tokio::test]
async fn resend_verification_delegates_to_the_provider() {
    let (app, backend) = app_with(MockBackend::new());

    let response = app
        .oneshot(post_json(
            "/auth/resend-verification",
            json!({ "email": "robin@example.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(
        backend.resent_to.lock().unwrap().as_slice(),
        ["robin@example.com"]
    );
}

#[tokio::test]
async fn check_profile_requires_a_session() {
    let (app, _backend) = app_with(MockBackend::new());

    let response = app
        .oneshot(Request::builder().uri("/auth/check-profile").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn check_profile_reports_existing_profile() {
    let user_id = Uuid::new_v4();
    let backend = MockBackend::new()
        .with_session("tok-1", user_id, "robin@example.com")
        .with_profile(sample_profile(user_id, AccountType::Single, None));
    let (app, _backend) = app_with(backend);

    let response = app
        .oneshot(common::get_with_cookie("/auth/check-profile", "tok-1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["exists"], true);
    assert_eq!(json["profile"]["email"], "robin@example.com");
}

#[tokio::test]
async fn check_profile_reports_missing_profile() {
    let user_id = Uuid::new_v4();
    let backend = MockBackend::new().with_session("tok-1", user_id, "robin@example.com");
    let (app, _backend) = app_with(backend);

    let response = app
        .oneshot(common::get_with_cookie("/auth/check-profile", "tok-1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["exists"], false);
    assert!(json.get("profile").is_none());
}
