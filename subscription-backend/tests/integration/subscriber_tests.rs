// tests/integration/subscriber_tests.rs

use crate::common::app_helper::{setup_app, setup_app_with_config};
use crate::common::request::{empty_request, json_request, response_bytes, response_json};
use crate::common::test_data::{create_subscriber, create_subscription, violation_fields};
use axum::http::StatusCode;
use serde_json::json;
use subscription_backend::config::AppConfig;
use tower::ServiceExt;

#[tokio::test]
async fn test_create_and_get_subscriber() {
    let app = setup_app();

    let created = create_subscriber(&app.router, "example@example.com", "John Doe").await;
    assert_eq!(created["email"], "example@example.com");
    assert_eq!(created["name"], "John Doe");
    assert!(created["created_at"].is_string());

    let id = created["id"].as_i64().unwrap();
    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", &format!("/api/subscribers/{}", id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let fetched = response_json(response).await;
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["email"], "example@example.com");
    assert_eq!(fetched["name"], "John Doe");
    assert!(fetched.get("subscriptions").is_none());
}

#[tokio::test]
async fn test_create_subscriber_validation_errors() {
    let app = setup_app();

    let response = app
        .router
        .clone()
        .oneshot(json_request("POST", "/api/subscribers", &json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error_type"], "validation_errors");
    assert_eq!(violation_fields(&body), vec!["email", "name"]);
    assert_eq!(
        body["validation_errors"]["email"][0],
        "The email field is required."
    );
}

#[tokio::test]
async fn test_create_subscriber_rejects_invalid_email_and_long_name() {
    let app = setup_app();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/subscribers",
            &json!({ "email": "not-an-email", "name": "a".repeat(256) }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert_eq!(violation_fields(&body), vec!["email", "name"]);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let app = setup_app();
    create_subscriber(&app.router, "dup@example.com", "First").await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/subscribers",
            &json!({ "email": "dup@example.com", "name": "Second" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert_eq!(violation_fields(&body), vec!["email"]);
    assert_eq!(
        body["validation_errors"]["email"][0],
        "The email has already been taken."
    );
}

#[tokio::test]
async fn test_malformed_json_is_body_violation() {
    let app = setup_app();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/subscribers")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert_eq!(violation_fields(&body), vec!["body"]);
}

#[tokio::test]
async fn test_wrong_json_type_is_body_violation() {
    let app = setup_app();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/subscribers",
            &json!({ "email": 12, "name": ["x"] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert_eq!(violation_fields(&body), vec!["body"]);
}

#[tokio::test]
async fn test_update_keeping_own_email() {
    let app = setup_app();
    let created = create_subscriber(&app.router, "keep@example.com", "Before").await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/subscribers/{}", id),
            &json!({ "email": "keep@example.com", "name": "After" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["email"], "keep@example.com");
    assert_eq!(body["name"], "After");
}

#[tokio::test]
async fn test_update_to_taken_email_fails() {
    let app = setup_app();
    create_subscriber(&app.router, "taken@example.com", "Owner").await;
    let other = create_subscriber(&app.router, "other@example.com", "Other").await;

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/subscribers/{}", other["id"]),
            &json!({ "email": "taken@example.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert_eq!(violation_fields(&body), vec!["email"]);
}

#[tokio::test]
async fn test_partial_and_empty_update() {
    let app = setup_app();
    let created = create_subscriber(&app.router, "partial@example.com", "Name").await;
    let uri = format!("/api/subscribers/{}", created["id"]);

    let response = app
        .router
        .clone()
        .oneshot(json_request("PUT", &uri, &json!({ "name": "Renamed" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["email"], "partial@example.com");
    assert_eq!(body["name"], "Renamed");

    let response = app
        .router
        .clone()
        .oneshot(json_request("PUT", &uri, &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["name"], "Renamed");
}

#[tokio::test]
async fn test_update_validates_before_lookup() {
    let app = setup_app();

    let invalid = app
        .router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/subscribers/999999",
            &json!({ "email": "broken" }),
        ))
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let missing = app
        .router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/subscribers/999999",
            &json!({ "name": "Nobody" }),
        ))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_subscriber_then_not_found() {
    let app = setup_app();
    let created = create_subscriber(&app.router, "gone@example.com", "Gone").await;
    let uri = format!("/api/subscribers/{}", created["id"]);

    let response = app
        .router
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response_bytes(response).await.is_empty());

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .router
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_subscriber_cascades_to_subscriptions() {
    let app = setup_app();
    let subscriber = create_subscriber(&app.router, "cascade@example.com", "Owner").await;
    let subscriber_id = subscriber["id"].as_i64().unwrap();
    let subscription = create_subscription(&app.router, subscriber_id).await;
    assert_eq!(app.store.subscription_count(), 1);

    let response = app
        .router
        .clone()
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/subscribers/{}", subscriber_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(app.store.subscription_count(), 0);

    let response = app
        .router
        .clone()
        .oneshot(empty_request(
            "GET",
            &format!("/api/subscriptions/{}", subscription["id"]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_and_non_integer_ids_are_not_found() {
    let app = setup_app();

    for uri in ["/api/subscribers/999999", "/api/subscribers/abc"] {
        let response = app
            .router
            .clone()
            .oneshot(empty_request("GET", uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response_json(response).await;
        assert_eq!(body["error_type"], "not_found");
        assert_eq!(body["message"], "The requested resource was not found");
    }
}

#[tokio::test]
async fn test_list_subscribers_with_subscriptions_and_paging() {
    let mut config = AppConfig::for_testing();
    config.default_page_size = 2;
    let app = setup_app_with_config(config);

    let first = create_subscriber(&app.router, "a@example.com", "A").await;
    create_subscriber(&app.router, "b@example.com", "B").await;
    create_subscriber(&app.router, "c@example.com", "C").await;
    create_subscription(&app.router, first["id"].as_i64().unwrap()).await;
    create_subscription(&app.router, first["id"].as_i64().unwrap()).await;

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/subscribers"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["email"], "a@example.com");
    let subscriptions = items[0]["subscriptions"].as_array().unwrap();
    assert_eq!(subscriptions.len(), 2);
    assert!(subscriptions[0]["id"].as_i64() < subscriptions[1]["id"].as_i64());
    assert_eq!(subscriptions[0]["payload"], json!({ "key": "value" }));
    assert_eq!(items[1]["subscriptions"], json!([]));

    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["per_page"], 2);
    assert_eq!(body["pagination"]["total_count"], 3);
    assert_eq!(body["pagination"]["total_pages"], 2);
    assert_eq!(body["pagination"]["has_next"], true);
    assert_eq!(body["pagination"]["has_prev"], false);

    let response = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/subscribers?page=2"))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["email"], "c@example.com");
    assert_eq!(body["pagination"]["has_prev"], true);
}

#[tokio::test]
async fn test_invalid_page_falls_back_to_first_page() {
    let app = setup_app();
    create_subscriber(&app.router, "only@example.com", "Only").await;

    for uri in [
        "/api/subscribers?page=abc",
        "/api/subscribers?page=0",
        "/api/subscribers?page=-3",
    ] {
        let response = app
            .router
            .clone()
            .oneshot(empty_request("GET", uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["pagination"]["page"], 1);
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
    }
}
