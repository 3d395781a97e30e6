// src/repository/mod.rs
//! 永続化コラボレーター
//!
//! サービス層はここで定義するトレイト越しにストアへアクセスする。
//! 本番では SeaORM 実装を、テストではインメモリ実装を注入する。

pub mod subscriber_repository;
pub mod subscription_repository;

use crate::domain::subscriber_model::{self, NewSubscriber, SubscriberChanges};
use crate::domain::subscription_model::{self, NewSubscription, SubscriptionChanges};
use async_trait::async_trait;
use sea_orm::DbErr;

/// 1ページ分の結果と全件数
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

/// 購読一覧を一括読み込みした購読者
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriberWithSubscriptions {
    pub subscriber: subscriber_model::Model,
    pub subscriptions: Vec<subscription_model::Model>,
}

#[async_trait]
pub trait SubscriberStore: Send + Sync {
    async fn insert_one(&self, new: NewSubscriber) -> Result<subscriber_model::Model, DbErr>;

    async fn find_by_id(&self, id: i32) -> Result<Option<subscriber_model::Model>, DbErr>;

    /// page は 1 始まり。id 昇順、購読は一括読み込み
    async fn find_all_paged(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<Page<SubscriberWithSubscriptions>, DbErr>;

    /// 対象が存在しなければ None
    async fn update_by_id(
        &self,
        id: i32,
        changes: SubscriberChanges,
    ) -> Result<Option<subscriber_model::Model>, DbErr>;

    /// 削除できた場合 true。所有する購読も削除される
    async fn delete_by_id(&self, id: i32) -> Result<bool, DbErr>;

    /// except_id の購読者自身は重複とみなさない
    async fn email_exists(&self, email: &str, except_id: Option<i32>) -> Result<bool, DbErr>;
}

#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn insert_one(&self, new: NewSubscription)
        -> Result<subscription_model::Model, DbErr>;

    async fn find_by_id(&self, id: i32) -> Result<Option<subscription_model::Model>, DbErr>;

    async fn find_all_paged(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<Page<subscription_model::Model>, DbErr>;

    async fn update_by_id(
        &self,
        id: i32,
        changes: SubscriptionChanges,
    ) -> Result<Option<subscription_model::Model>, DbErr>;

    async fn delete_by_id(&self, id: i32) -> Result<bool, DbErr>;
}
