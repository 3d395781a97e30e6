// src/api/dto/subscriber_dto.rs
use crate::api::dto::subscription_dto::SubscriptionDto;
use crate::api::dto::PaginatedResponse;
use crate::domain::subscriber_model::{self, NewSubscriber, SubscriberChanges};
use crate::error::FieldViolation;
use crate::repository::SubscriberWithSubscriptions;
use crate::utils::error_helper::collect_violations;
use crate::utils::validation::{subscriber, trim_field};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Default, Validate)]
pub struct CreateSubscriberDto {
    #[validate(
        required(message = "The email field is required."),
        email(message = "The email must be a valid email address.")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "The name field is required."),
        length(
            min = subscriber::NAME_MIN_LENGTH,
            max = subscriber::NAME_MAX_LENGTH,
            message = "The name must be between 1 and 255 characters."
        )
    )]
    pub name: Option<String>,
}

impl CreateSubscriberDto {
    pub fn normalized(mut self) -> Self {
        trim_field(&mut self.email);
        trim_field(&mut self.name);
        self
    }

    /// 入力形式のみの検証。一意性はサービス層でストアに問い合わせる
    pub fn violations(&self) -> Vec<FieldViolation> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => collect_violations(&errors),
        }
    }

    pub fn into_new_subscriber(self) -> Option<NewSubscriber> {
        Some(NewSubscriber {
            email: self.email?,
            name: self.name?,
        })
    }
}

/// 部分更新。指定されたフィールドのみ作成時と同じ制約で検証する
#[derive(Deserialize, Serialize, Debug, Default, Validate)]
pub struct UpdateSubscriberDto {
    #[validate(email(message = "The email must be a valid email address."))]
    pub email: Option<String>,

    #[validate(length(
        min = subscriber::NAME_MIN_LENGTH,
        max = subscriber::NAME_MAX_LENGTH,
        message = "The name must be between 1 and 255 characters."
    ))]
    pub name: Option<String>,
}

impl UpdateSubscriberDto {
    pub fn normalized(mut self) -> Self {
        trim_field(&mut self.email);
        trim_field(&mut self.name);
        self
    }

    pub fn violations(&self) -> Vec<FieldViolation> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => collect_violations(&errors),
        }
    }
}

impl From<UpdateSubscriberDto> for SubscriberChanges {
    fn from(dto: UpdateSubscriberDto) -> Self {
        Self {
            email: dto.email,
            name: dto.name,
        }
    }
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubscriberDto {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<subscriber_model::Model> for SubscriberDto {
    fn from(model: subscriber_model::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// 一覧用。購読を一括読み込みした購読者
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubscriberWithSubscriptionsDto {
    #[serde(flatten)]
    pub subscriber: SubscriberDto,
    pub subscriptions: Vec<SubscriptionDto>,
}

impl From<SubscriberWithSubscriptions> for SubscriberWithSubscriptionsDto {
    fn from(value: SubscriberWithSubscriptions) -> Self {
        Self {
            subscriber: value.subscriber.into(),
            subscriptions: value.subscriptions.into_iter().map(Into::into).collect(),
        }
    }
}

pub type PaginatedSubscribersDto = PaginatedResponse<SubscriberWithSubscriptionsDto>;
