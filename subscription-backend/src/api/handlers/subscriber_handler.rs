// src/api/handlers/subscriber_handler.rs
use crate::api::dto::subscriber_dto::{
    CreateSubscriberDto, PaginatedSubscribersDto, SubscriberDto, UpdateSubscriberDto,
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

pub async fn list_subscribers_handler(
    State(app_state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedSubscribersDto>> {
    let page = app_state
        .subscriber_service
        .list_subscribers(query.page())
        .await?;
    Ok(Json(page))
}

pub async fn create_subscriber_handler(
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody<CreateSubscriberDto>,
) -> AppResult<impl IntoResponse> {
    let subscriber = app_state
        .subscriber_service
        .create_subscriber(payload)
        .await?;

    Ok((StatusCode::CREATED, Json(subscriber)))
}

pub async fn get_subscriber_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<SubscriberDto>> {
    let subscriber = app_state.subscriber_service.get_subscriber(id).await?;
    Ok(Json(subscriber))
}

pub async fn update_subscriber_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<UpdateSubscriberDto>,
) -> AppResult<Json<SubscriberDto>> {
    let subscriber = app_state
        .subscriber_service
        .update_subscriber(id, payload)
        .await?;
    Ok(Json(subscriber))
}

pub async fn delete_subscriber_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<StatusCode> {
    info!(subscriber_id = %id, "Deleting subscriber");

    app_state.subscriber_service.delete_subscriber(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn subscriber_router() -> Router<AppState> {
    Router::new()
        .route(
            "/subscribers",
            get(list_subscribers_handler).post(create_subscriber_handler),
        )
        .route(
            "/subscribers/{id}",
            get(get_subscriber_handler)
                .put(update_subscriber_handler)
                .delete(delete_subscriber_handler),
        )
}
