// src/repository/subscriber_repository.rs
use crate::domain::subscriber_model::{
    self, ActiveModel as SubscriberActiveModel, Entity as SubscriberEntity, NewSubscriber,
    SubscriberChanges,
};
use crate::domain::subscription_model::{self, Entity as SubscriptionEntity};
use crate::repository::{Page, SubscriberStore, SubscriberWithSubscriptions};
use async_trait::async_trait;
use sea_orm::{entity::*, query::*, DbConn, DbErr, LoaderTrait, PaginatorTrait, Set};

pub struct SubscriberRepository {
    db: DbConn,
}

impl SubscriberRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriberStore for SubscriberRepository {
    async fn insert_one(&self, new: NewSubscriber) -> Result<subscriber_model::Model, DbErr> {
        let new_subscriber = SubscriberActiveModel {
            email: Set(new.email),
            name: Set(new.name),
            ..<SubscriberActiveModel as ActiveModelBehavior>::new()
        };
        new_subscriber.insert(&self.db).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<subscriber_model::Model>, DbErr> {
        SubscriberEntity::find_by_id(id).one(&self.db).await
    }

    async fn find_all_paged(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<Page<SubscriberWithSubscriptions>, DbErr> {
        let paginator = SubscriberEntity::find()
            .order_by_asc(subscriber_model::Column::Id)
            .paginate(&self.db, per_page);

        let total_count = paginator.num_items().await?;
        let subscribers = paginator.fetch_page(page.saturating_sub(1)).await?;

        // ページ内の購読者の購読をまとめて1クエリで取得
        let subscriptions = subscribers
            .load_many(
                SubscriptionEntity::find().order_by_asc(subscription_model::Column::Id),
                &self.db,
            )
            .await?;

        let items = subscribers
            .into_iter()
            .zip(subscriptions)
            .map(|(subscriber, subscriptions)| SubscriberWithSubscriptions {
                subscriber,
                subscriptions,
            })
            .collect();

        Ok(Page { items, total_count })
    }

    async fn update_by_id(
        &self,
        id: i32,
        changes: SubscriberChanges,
    ) -> Result<Option<subscriber_model::Model>, DbErr> {
        let subscriber = match SubscriberEntity::find_by_id(id).one(&self.db).await? {
            Some(s) => s,
            None => return Ok(None),
        };

        if changes.is_empty() {
            // 何も変更がなければ元のレコードを返す (updated_at は更新されない)
            return Ok(Some(subscriber));
        }

        let mut active_model: SubscriberActiveModel = subscriber.into();

        if let Some(email) = changes.email {
            active_model.email = Set(email);
        }

        if let Some(name) = changes.name {
            active_model.name = Set(name);
        }

        Ok(Some(active_model.update(&self.db).await?))
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, DbErr> {
        let result = SubscriberEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn email_exists(&self, email: &str, except_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            SubscriberEntity::find().filter(subscriber_model::Column::Email.eq(email));

        if let Some(id) = except_id {
            query = query.filter(subscriber_model::Column::Id.ne(id));
        }

        Ok(query.count(&self.db).await? > 0)
    }
}
