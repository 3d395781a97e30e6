// subscription-backend/src/api/mod.rs
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::logging::{inject_request_context, logging_middleware};
use crate::middleware::auth::{jwt_auth_middleware, AuthMiddlewareConfig};
use crate::repository::subscriber_repository::SubscriberRepository;
use crate::repository::subscription_repository::SubscriptionRepository;
use crate::repository::{SubscriberStore, SubscriptionStore};
use crate::service::{
    subscriber_service::SubscriberService, subscription_service::SubscriptionService,
};
use crate::utils::jwt::JwtManager;
use axum::{
    http::{header, HeaderValue, Method},
    middleware, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub subscriber_service: Arc<SubscriberService>,
    pub subscription_service: Arc<SubscriptionService>,
    pub jwt_manager: Arc<JwtManager>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        subscribers: Arc<dyn SubscriberStore>,
        subscriptions: Arc<dyn SubscriptionStore>,
        jwt_manager: Arc<JwtManager>,
        config: Arc<AppConfig>,
    ) -> Self {
        let page_size = config.default_page_size;
        Self {
            subscriber_service: Arc::new(SubscriberService::new(subscribers.clone(), page_size)),
            subscription_service: Arc::new(SubscriptionService::new(
                subscriptions,
                subscribers,
                page_size,
            )),
            jwt_manager,
            config,
        }
    }

    /// SeaORM リポジトリを使う本番構成
    pub fn with_database(db: DbPool, jwt_manager: Arc<JwtManager>, config: Arc<AppConfig>) -> Self {
        Self::new(
            Arc::new(SubscriberRepository::new(db.clone())),
            Arc::new(SubscriptionRepository::new(db)),
            jwt_manager,
            config,
        )
    }
}

/// アプリケーション全体のルーター
///
/// `/api/user` は常に JWT 認証を要求する。購読者・購読 API は
/// `protect_resources` が有効な場合のみ認証対象になる。
pub fn app_router(app_state: AppState) -> Router {
    let auth_config = AuthMiddlewareConfig::new(app_state.jwt_manager.clone());

    let mut resources = Router::new()
        .merge(handlers::subscriber_handler::subscriber_router())
        .merge(handlers::subscription_handler::subscription_router());

    if app_state.config.protect_resources {
        resources = resources.route_layer(middleware::from_fn_with_state(
            auth_config.clone(),
            jwt_auth_middleware,
        ));
    }

    let user = handlers::user_handler::user_router().route_layer(
        middleware::from_fn_with_state(auth_config, jwt_auth_middleware),
    );

    let cors = cors_layer(&app_state.config);

    Router::new()
        .nest("/api", resources.merge(user))
        .merge(handlers::system_handler::system_router())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(inject_request_context))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// CORS 設定
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true) // Cookie送信を許可
        .max_age(Duration::from_secs(3600))
}
