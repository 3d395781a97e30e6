// src/api/handlers/system_handler.rs
use crate::api::AppState;
use axum::{routing::get, Router};

async fn health_check_handler() -> &'static str {
    "OK"
}

pub fn system_router() -> Router<AppState> {
    Router::new().route("/health", get(health_check_handler))
}
