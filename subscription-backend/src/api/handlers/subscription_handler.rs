// src/api/handlers/subscription_handler.rs
use crate::api::dto::subscription_dto::{
    CreateSubscriptionDto, PaginatedSubscriptionsDto, SubscriptionDto, UpdateSubscriptionDto,
};
use crate::api::dto::PageQuery;
use crate::api::AppState;
use crate::error::AppResult;
use crate::extractors::{IdPath, JsonBody};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::info;

pub async fn list_subscriptions_handler(
    State(app_state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedSubscriptionsDto>> {
    let page = app_state
        .subscription_service
        .list_subscriptions(query.page())
        .await?;
    Ok(Json(page))
}

pub async fn create_subscription_handler(
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody<CreateSubscriptionDto>,
) -> AppResult<impl IntoResponse> {
    let subscription = app_state
        .subscription_service
        .create_subscription(payload)
        .await?;

    Ok((StatusCode::CREATED, Json(subscription)))
}

pub async fn get_subscription_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<SubscriptionDto>> {
    let subscription = app_state.subscription_service.get_subscription(id).await?;
    Ok(Json(subscription))
}

pub async fn update_subscription_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<UpdateSubscriptionDto>,
) -> AppResult<Json<SubscriptionDto>> {
    let subscription = app_state
        .subscription_service
        .update_subscription(id, payload)
        .await?;
    Ok(Json(subscription))
}

pub async fn delete_subscription_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<StatusCode> {
    info!(subscription_id = %id, "Deleting subscription");

    app_state
        .subscription_service
        .delete_subscription(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn subscription_router() -> Router<AppState> {
    Router::new()
        .route(
            "/subscriptions",
            get(list_subscriptions_handler).post(create_subscription_handler),
        )
        .route(
            "/subscriptions/{id}",
            get(get_subscription_handler)
                .put(update_subscription_handler)
                .delete(delete_subscription_handler),
        )
}
