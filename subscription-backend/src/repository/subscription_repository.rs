// src/repository/subscription_repository.rs
use crate::domain::subscription_model::{
    self, ActiveModel as SubscriptionActiveModel, Entity as SubscriptionEntity, NewSubscription,
    SubscriptionChanges,
};
use crate::repository::{Page, SubscriptionStore};
use async_trait::async_trait;
use sea_orm::{entity::*, query::*, DbConn, DbErr, PaginatorTrait, Set};

pub struct SubscriptionRepository {
    db: DbConn,
}

impl SubscriptionRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionStore for SubscriptionRepository {
    async fn insert_one(
        &self,
        new: NewSubscription,
    ) -> Result<subscription_model::Model, DbErr> {
        let new_subscription = SubscriptionActiveModel {
            service: Set(new.service),
            topic: Set(new.topic),
            payload: Set(new.payload),
            expired_at: Set(new.expired_at),
            subscriber_id: Set(new.subscriber_id),
            ..<SubscriptionActiveModel as ActiveModelBehavior>::new()
        };
        new_subscription.insert(&self.db).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<subscription_model::Model>, DbErr> {
        SubscriptionEntity::find_by_id(id).one(&self.db).await
    }

    async fn find_all_paged(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<Page<subscription_model::Model>, DbErr> {
        let paginator = SubscriptionEntity::find()
            .order_by_asc(subscription_model::Column::Id)
            .paginate(&self.db, per_page);

        let total_count = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(Page { items, total_count })
    }

    async fn update_by_id(
        &self,
        id: i32,
        changes: SubscriptionChanges,
    ) -> Result<Option<subscription_model::Model>, DbErr> {
        let subscription = match SubscriptionEntity::find_by_id(id).one(&self.db).await? {
            Some(s) => s,
            None => return Ok(None),
        };

        if changes.is_empty() {
            return Ok(Some(subscription));
        }

        let mut active_model: SubscriptionActiveModel = subscription.into();

        if let Some(service) = changes.service {
            active_model.service = Set(service);
        }

        if let Some(topic) = changes.topic {
            active_model.topic = Set(topic);
        }

        if let Some(payload) = changes.payload {
            active_model.payload = Set(payload);
        }

        if let Some(expired_at) = changes.expired_at {
            active_model.expired_at = Set(expired_at);
        }

        Ok(Some(active_model.update(&self.db).await?))
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, DbErr> {
        let result = SubscriptionEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
