// src/domain/subscription_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub service: String,
    pub topic: String,
    // jsonb として保存し、読み出し時は構造化データのまま扱う
    #[sea_orm(column_type = "JsonBinary")]
    pub payload: Json,
    #[sea_orm(nullable)]
    pub expired_at: Option<DateTime<Utc>>,
    pub subscriber_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subscriber_model::Entity",
        from = "Column::SubscriberId",
        to = "super::subscriber_model::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Subscriber,
}

impl Related<super::subscriber_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscriber.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(Utc::now());
        }
        Ok(self)
    }
}

/// 検証済みの新規購読
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub service: String,
    pub topic: String,
    pub payload: Json,
    pub expired_at: Option<DateTime<Utc>>,
    pub subscriber_id: i32,
}

/// 購読の部分更新。subscriber_id は付け替え不可のため含まない
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionChanges {
    pub service: Option<String>,
    pub topic: Option<String>,
    pub payload: Option<Json>,
    /// Some(None) は期限のクリア、None は変更なし
    pub expired_at: Option<Option<DateTime<Utc>>>,
}

impl SubscriptionChanges {
    pub fn is_empty(&self) -> bool {
        self.service.is_none()
            && self.topic.is_none()
            && self.payload.is_none()
            && self.expired_at.is_none()
    }
}
