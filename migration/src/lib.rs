// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// 購読者・購読テーブル
mod m20250401_000001_create_subscribers_table;
mod m20250401_000002_create_subscriptions_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 外部キーの参照先を先に作成する
            Box::new(m20250401_000001_create_subscribers_table::Migration),
            Box::new(m20250401_000002_create_subscriptions_table::Migration),
        ]
    }
}
