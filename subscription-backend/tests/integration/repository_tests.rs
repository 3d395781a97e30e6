// tests/integration/repository_tests.rs
//
// PostgreSQL コンテナを起動するため Docker が必要。
// `cargo test -- --ignored` で実行する。

use crate::common::db::TestDatabase;
use crate::common::request::{empty_request, json_request, response_json};
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use subscription_backend::api::{app_router, AppState};
use subscription_backend::config::AppConfig;
use subscription_backend::domain::subscriber_model::{NewSubscriber, SubscriberChanges};
use subscription_backend::domain::subscription_model::{NewSubscription, SubscriptionChanges};
use subscription_backend::error::AppError;
use subscription_backend::repository::subscriber_repository::SubscriberRepository;
use subscription_backend::repository::subscription_repository::SubscriptionRepository;
use subscription_backend::repository::{SubscriberStore, SubscriptionStore};
use subscription_backend::utils::error_helper::map_constraint_violation;
use subscription_backend::utils::jwt::JwtManager;
use tower::ServiceExt;

fn new_subscriber(email: &str) -> NewSubscriber {
    NewSubscriber {
        email: email.to_string(),
        name: "Test Subscriber".to_string(),
    }
}

fn new_subscription(subscriber_id: i32) -> NewSubscription {
    NewSubscription {
        service: "newsletter".to_string(),
        topic: "weekly".to_string(),
        payload: json!({ "key": "value" }),
        expired_at: None,
        subscriber_id,
    }
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_subscriber_crud_and_eager_load() {
    crate::common::init_test_env();
    let db = TestDatabase::new().await;
    let subscribers = SubscriberRepository::new(db.connection.clone());
    let subscriptions = SubscriptionRepository::new(db.connection.clone());

    let first = subscribers
        .insert_one(new_subscriber("first@example.com"))
        .await
        .unwrap();
    let second = subscribers
        .insert_one(new_subscriber("second@example.com"))
        .await
        .unwrap();
    let s1 = subscriptions.insert_one(new_subscription(first.id)).await.unwrap();
    let s2 = subscriptions.insert_one(new_subscription(first.id)).await.unwrap();

    let page = subscribers.find_all_paged(1, 15).await.unwrap();
    assert_eq!(page.total_count, 2);
    assert_eq!(page.items[0].subscriber.id, first.id);
    let ids: Vec<i32> = page.items[0].subscriptions.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![s1.id, s2.id]);
    assert!(page.items[1].subscriptions.is_empty());

    let second_page = subscribers.find_all_paged(2, 1).await.unwrap();
    assert_eq!(second_page.items.len(), 1);
    assert_eq!(second_page.items[0].subscriber.id, second.id);

    let updated = subscribers
        .update_by_id(
            second.id,
            SubscriberChanges {
                name: Some("Renamed".to_string()),
                email: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.email, "second@example.com");
    assert!(updated.updated_at >= second.updated_at);

    assert!(subscribers
        .email_exists("first@example.com", None)
        .await
        .unwrap());
    assert!(!subscribers
        .email_exists("first@example.com", Some(first.id))
        .await
        .unwrap());

    assert!(subscribers
        .update_by_id(999_999, SubscriberChanges::default())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_delete_subscriber_cascades() {
    crate::common::init_test_env();
    let db = TestDatabase::new().await;
    let subscribers = SubscriberRepository::new(db.connection.clone());
    let subscriptions = SubscriptionRepository::new(db.connection.clone());

    let owner = subscribers
        .insert_one(new_subscriber("cascade@example.com"))
        .await
        .unwrap();
    let subscription = subscriptions
        .insert_one(new_subscription(owner.id))
        .await
        .unwrap();

    assert!(subscribers.delete_by_id(owner.id).await.unwrap());
    assert!(!subscribers.delete_by_id(owner.id).await.unwrap());
    assert!(subscriptions
        .find_by_id(subscription.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_subscription_payload_and_expiry_updates() {
    crate::common::init_test_env();
    let db = TestDatabase::new().await;
    let subscribers = SubscriberRepository::new(db.connection.clone());
    let subscriptions = SubscriptionRepository::new(db.connection.clone());

    let owner = subscribers
        .insert_one(new_subscriber("payload@example.com"))
        .await
        .unwrap();
    let mut new = new_subscription(owner.id);
    new.payload = json!({ "nested": { "list": [1, 2, 3] } });
    new.expired_at = Some(chrono::Utc::now());
    let created = subscriptions.insert_one(new).await.unwrap();

    let found = subscriptions.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.payload, json!({ "nested": { "list": [1, 2, 3] } }));
    assert!(found.expired_at.is_some());

    let cleared = subscriptions
        .update_by_id(
            created.id,
            SubscriptionChanges {
                expired_at: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert!(cleared.expired_at.is_none());
    assert_eq!(cleared.payload, found.payload);

    let page = subscriptions.find_all_paged(1, 15).await.unwrap();
    assert_eq!(page.total_count, 1);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_constraint_violations_map_to_field_errors() {
    crate::common::init_test_env();
    let db = TestDatabase::new().await;
    let subscribers = SubscriberRepository::new(db.connection.clone());
    let subscriptions = SubscriptionRepository::new(db.connection.clone());

    subscribers
        .insert_one(new_subscriber("unique@example.com"))
        .await
        .unwrap();

    let err = subscribers
        .insert_one(new_subscriber("unique@example.com"))
        .await
        .unwrap_err();
    let mapped = map_constraint_violation(
        err,
        "test",
        Some(("email", "The email has already been taken.")),
        None,
    );
    assert!(matches!(mapped, AppError::ValidationErrors(v) if v[0].field == "email"));

    let err = subscriptions
        .insert_one(new_subscription(999_999))
        .await
        .unwrap_err();
    let mapped = map_constraint_violation(
        err,
        "test",
        None,
        Some(("subscriber_id", "The selected subscriber id is invalid.")),
    );
    assert!(matches!(mapped, AppError::ValidationErrors(v) if v[0].field == "subscriber_id"));
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn test_router_against_postgres() {
    crate::common::init_test_env();
    let db = TestDatabase::new().await;
    let config = AppConfig::for_testing();
    let jwt_manager = Arc::new(JwtManager::new(config.jwt.clone()).unwrap());
    let app = app_router(AppState::with_database(
        db.connection.clone(),
        jwt_manager,
        Arc::new(config),
    ));

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/subscribers",
            &json!({ "email": "pg@example.com", "name": "Postgres" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let subscriber = response_json(response).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/subscriptions",
            &json!({
                "service": "alerts",
                "topic": "outage",
                "payload": { "key": "value" },
                "subscriber_id": subscriber["id"]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let subscription = response_json(response).await;
    assert_eq!(subscription["payload"], json!({ "key": "value" }));

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/subscribers"))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["items"][0]["subscriptions"][0]["id"], subscription["id"]);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/subscriptions/999999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
