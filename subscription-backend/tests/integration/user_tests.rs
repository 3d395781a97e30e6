// tests/integration/user_tests.rs

use crate::common::app_helper::{setup_app, setup_app_with_config};
use crate::common::request::{authenticated_request, empty_request, response_json};
use axum::{body::Body, http::Request, http::StatusCode};
use subscription_backend::config::AppConfig;
use tower::ServiceExt;

#[tokio::test]
async fn test_current_user_requires_token() {
    let app = setup_app();

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/user"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["error_type"], "unauthorized");
}

#[tokio::test]
async fn test_current_user_rejects_invalid_token() {
    let app = setup_app();

    let response = app
        .router
        .clone()
        .oneshot(authenticated_request("GET", "/api/user", "not.a.token"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_with_bearer_token() {
    let app = setup_app();
    let (claims, token) = app.issue_token("alice", "alice@example.com");

    let response = app
        .router
        .clone()
        .oneshot(authenticated_request("GET", "/api/user", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["id"], claims.user_id.to_string());
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
}

#[tokio::test]
async fn test_current_user_with_cookie() {
    let app = setup_app();
    let (_, token) = app.issue_token("bob", "bob@example.com");

    let request = Request::builder()
        .method("GET")
        .uri("/api/user")
        .header("cookie", format!("access_token={}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["username"], "bob");
}

#[tokio::test]
async fn test_resources_are_public_by_default() {
    let app = setup_app();

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/subscribers"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_resources_require_token() {
    let mut config = AppConfig::for_testing();
    config.protect_resources = true;
    let app = setup_app_with_config(config);

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/subscriptions"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (_, token) = app.issue_token("carol", "carol@example.com");
    let response = app
        .router
        .clone()
        .oneshot(authenticated_request("GET", "/api/subscriptions", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
