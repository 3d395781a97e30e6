// src/api/handlers/user_handler.rs
use crate::api::dto::user_dto::CurrentUserDto;
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use axum::{routing::get, Json, Router};

/// 認証済みユーザーの情報を返す
pub async fn current_user_handler(user: AuthenticatedUser) -> AppResult<Json<CurrentUserDto>> {
    Ok(Json(user.claims.into()))
}

pub fn user_router() -> Router<AppState> {
    Router::new().route("/user", get(current_user_handler))
}
