// src/db.rs
use crate::config::AppConfig;
use migration::Migrator;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::info;

pub type DbPool = DatabaseConnection;

pub async fn create_db_pool(config: &AppConfig) -> Result<DbPool, DbErr> {
    let mut opt = ConnectOptions::new(config.database_url.clone());

    // 接続オプションを設定
    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8 * 60))
        .sqlx_logging(config.is_development());

    Database::connect(opt).await
}

/// 未適用のマイグレーションを実行
pub async fn run_migrations(conn: &DbPool) -> Result<(), DbErr> {
    let pending = Migrator::get_pending_migrations(conn).await?.len();
    info!(pending_migrations = pending, "Applying database migrations");
    Migrator::up(conn, None).await
}
