// migration/src/main.rs
use migration::Migrator;
use sea_orm_migration::prelude::*;

// migration/Cargo.toml の async-std ランタイムで CLI を実行
#[async_std::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
