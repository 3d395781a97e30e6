// src/service/subscriber_service.rs

use crate::api::dto::subscriber_dto::{
    CreateSubscriberDto, PaginatedSubscribersDto, SubscriberDto, UpdateSubscriberDto,
};
use crate::api::dto::PaginatedResponse;
use crate::error::{AppError, AppResult, FieldViolation};
use crate::repository::SubscriberStore;
use crate::utils::error_helper::{ensure_valid, internal_db_error, map_constraint_violation};
use std::sync::Arc;
use tracing::info;

const EMAIL_TAKEN: &str = "The email has already been taken.";

pub struct SubscriberService {
    store: Arc<dyn SubscriberStore>,
    page_size: u64,
}

impl SubscriberService {
    pub fn new(store: Arc<dyn SubscriberStore>, page_size: u64) -> Self {
        Self { store, page_size }
    }

    pub async fn list_subscribers(&self, page: u64) -> AppResult<PaginatedSubscribersDto> {
        let result = self
            .store
            .find_all_paged(page, self.page_size)
            .await
            .map_err(|e| internal_db_error(e, "subscriber_service::list_subscribers"))?;

        let items = result.items.into_iter().map(Into::into).collect();
        Ok(PaginatedResponse::new(
            items,
            page,
            self.page_size,
            result.total_count,
        ))
    }

    pub async fn create_subscriber(&self, payload: CreateSubscriberDto) -> AppResult<SubscriberDto> {
        let payload = payload.normalized();
        let mut violations = payload.violations();
        if let Some(email) = payload.email.as_deref() {
            self.check_email_unique(email, None, &mut violations).await?;
        }
        ensure_valid(violations, "subscriber_service::create_subscriber")?;

        let new = payload.into_new_subscriber().ok_or_else(|| {
            AppError::InternalServerError("Validated subscriber is incomplete".to_string())
        })?;

        let created = self.store.insert_one(new).await.map_err(|e| {
            map_constraint_violation(
                e,
                "subscriber_service::create_subscriber",
                Some(("email", EMAIL_TAKEN)),
                None,
            )
        })?;

        info!(subscriber_id = %created.id, "Subscriber created");
        Ok(created.into())
    }

    pub async fn get_subscriber(&self, id: i32) -> AppResult<SubscriberDto> {
        self.store
            .find_by_id(id)
            .await
            .map_err(|e| internal_db_error(e, "subscriber_service::get_subscriber"))?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Subscriber with id {} not found", id)))
    }

    /// 入力検証を先に行い、その後に対象の存在を確認する
    pub async fn update_subscriber(
        &self,
        id: i32,
        payload: UpdateSubscriberDto,
    ) -> AppResult<SubscriberDto> {
        let payload = payload.normalized();
        let mut violations = payload.violations();
        if let Some(email) = payload.email.as_deref() {
            self.check_email_unique(email, Some(id), &mut violations)
                .await?;
        }
        ensure_valid(violations, "subscriber_service::update_subscriber")?;

        let updated = self
            .store
            .update_by_id(id, payload.into())
            .await
            .map_err(|e| {
                map_constraint_violation(
                    e,
                    "subscriber_service::update_subscriber",
                    Some(("email", EMAIL_TAKEN)),
                    None,
                )
            })?
            .ok_or_else(|| AppError::NotFound(format!("Subscriber with id {} not found", id)))?;

        info!(subscriber_id = %updated.id, "Subscriber updated");
        Ok(updated.into())
    }

    pub async fn delete_subscriber(&self, id: i32) -> AppResult<()> {
        let deleted = self
            .store
            .delete_by_id(id)
            .await
            .map_err(|e| internal_db_error(e, "subscriber_service::delete_subscriber"))?;

        if !deleted {
            return Err(AppError::NotFound(format!(
                "Subscriber with id {} not found",
                id
            )));
        }

        info!(subscriber_id = %id, "Subscriber deleted");
        Ok(())
    }

    // 形式が正しいメールアドレスに限り一意性を確認する
    async fn check_email_unique(
        &self,
        email: &str,
        except_id: Option<i32>,
        violations: &mut Vec<FieldViolation>,
    ) -> AppResult<()> {
        if violations.iter().any(|v| v.field == "email") {
            return Ok(());
        }

        let exists = self
            .store
            .email_exists(email, except_id)
            .await
            .map_err(|e| internal_db_error(e, "subscriber_service::check_email_unique"))?;

        if exists {
            violations.push(FieldViolation::new("email", EMAIL_TAKEN));
            violations.sort_by(|a, b| a.field.cmp(&b.field));
        }
        Ok(())
    }
}
