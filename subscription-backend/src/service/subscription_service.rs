// src/service/subscription_service.rs

use crate::api::dto::subscription_dto::{
    CreateSubscriptionDto, PaginatedSubscriptionsDto, SubscriptionDto, UpdateSubscriptionDto,
};
use crate::api::dto::PaginatedResponse;
use crate::error::{AppError, AppResult, FieldViolation};
use crate::repository::{SubscriberStore, SubscriptionStore};
use crate::utils::error_helper::{ensure_valid, internal_db_error, map_constraint_violation};
use std::sync::Arc;
use tracing::info;

const SUBSCRIBER_INVALID: &str = "The selected subscriber id is invalid.";

pub struct SubscriptionService {
    subscriptions: Arc<dyn SubscriptionStore>,
    subscribers: Arc<dyn SubscriberStore>,
    page_size: u64,
}

impl SubscriptionService {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionStore>,
        subscribers: Arc<dyn SubscriberStore>,
        page_size: u64,
    ) -> Self {
        Self {
            subscriptions,
            subscribers,
            page_size,
        }
    }

    pub async fn list_subscriptions(&self, page: u64) -> AppResult<PaginatedSubscriptionsDto> {
        let result = self
            .subscriptions
            .find_all_paged(page, self.page_size)
            .await
            .map_err(|e| internal_db_error(e, "subscription_service::list_subscriptions"))?;

        let items = result.items.into_iter().map(Into::into).collect();
        Ok(PaginatedResponse::new(
            items,
            page,
            self.page_size,
            result.total_count,
        ))
    }

    pub async fn create_subscription(
        &self,
        payload: CreateSubscriptionDto,
    ) -> AppResult<SubscriptionDto> {
        let payload = payload.normalized();
        let mut violations = payload.violations();
        if let Some(subscriber_id) = payload.subscriber_id {
            self.check_subscriber_exists(subscriber_id, &mut violations)
                .await?;
        }
        ensure_valid(violations, "subscription_service::create_subscription")?;

        let new = payload.into_new_subscription().ok_or_else(|| {
            AppError::InternalServerError("Validated subscription is incomplete".to_string())
        })?;

        let created = self.subscriptions.insert_one(new).await.map_err(|e| {
            map_constraint_violation(
                e,
                "subscription_service::create_subscription",
                None,
                Some(("subscriber_id", SUBSCRIBER_INVALID)),
            )
        })?;

        info!(
            subscription_id = %created.id,
            subscriber_id = %created.subscriber_id,
            service = %created.service,
            "Subscription created"
        );
        Ok(created.into())
    }

    pub async fn get_subscription(&self, id: i32) -> AppResult<SubscriptionDto> {
        self.subscriptions
            .find_by_id(id)
            .await
            .map_err(|e| internal_db_error(e, "subscription_service::get_subscription"))?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Subscription with id {} not found", id)))
    }

    pub async fn update_subscription(
        &self,
        id: i32,
        payload: UpdateSubscriptionDto,
    ) -> AppResult<SubscriptionDto> {
        let payload = payload.normalized();
        ensure_valid(
            payload.violations(),
            "subscription_service::update_subscription",
        )?;

        let changes = payload.into_changes().ok_or_else(|| {
            AppError::InternalServerError("Validated subscription changes are incomplete".to_string())
        })?;

        let updated = self
            .subscriptions
            .update_by_id(id, changes)
            .await
            .map_err(|e| internal_db_error(e, "subscription_service::update_subscription"))?
            .ok_or_else(|| AppError::NotFound(format!("Subscription with id {} not found", id)))?;

        info!(subscription_id = %updated.id, "Subscription updated");
        Ok(updated.into())
    }

    pub async fn delete_subscription(&self, id: i32) -> AppResult<()> {
        let deleted = self
            .subscriptions
            .delete_by_id(id)
            .await
            .map_err(|e| internal_db_error(e, "subscription_service::delete_subscription"))?;

        if !deleted {
            return Err(AppError::NotFound(format!(
                "Subscription with id {} not found",
                id
            )));
        }

        info!(subscription_id = %id, "Subscription deleted");
        Ok(())
    }

    async fn check_subscriber_exists(
        &self,
        subscriber_id: i32,
        violations: &mut Vec<FieldViolation>,
    ) -> AppResult<()> {
        let subscriber = self
            .subscribers
            .find_by_id(subscriber_id)
            .await
            .map_err(|e| internal_db_error(e, "subscription_service::check_subscriber_exists"))?;

        if subscriber.is_none() {
            violations.push(FieldViolation::new("subscriber_id", SUBSCRIBER_INVALID));
            violations.sort_by(|a, b| a.field.cmp(&b.field));
        }
        Ok(())
    }
}
