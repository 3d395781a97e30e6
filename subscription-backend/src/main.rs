// src/main.rs
use std::sync::Arc;
use subscription_backend::api::{app_router, AppState};
use subscription_backend::config::AppConfig;
use subscription_backend::db::{create_db_pool, run_migrations};
use subscription_backend::utils::jwt::JwtManager;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subscription_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting Subscription Backend server...");

    // 設定を読み込む
    let app_config = AppConfig::from_env()?;
    tracing::info!(
        environment = %app_config.environment,
        page_size = app_config.default_page_size,
        protect_resources = app_config.protect_resources,
        "Configuration loaded"
    );

    // データベース接続を作成
    let db_pool = create_db_pool(&app_config).await?;
    tracing::info!("Database pool created successfully.");

    if app_config.auto_migrate {
        run_migrations(&db_pool).await?;
    }

    let jwt_manager = Arc::new(JwtManager::new(app_config.jwt.clone())?);
    let server_addr = app_config.server_addr();
    let app_state = AppState::with_database(db_pool, jwt_manager, Arc::new(app_config));

    // ルーターの設定
    let app_router = app_router(app_state);

    // サーバーの起動
    tracing::info!("Router configured. Server listening on {}", server_addr);

    let listener = TcpListener::bind(&server_addr).await?;
    axum::serve(listener, app_router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
