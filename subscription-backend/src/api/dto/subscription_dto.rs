// src/api/dto/subscription_dto.rs
use crate::api::dto::PaginatedResponse;
use crate::domain::subscription_model::{self, NewSubscription, SubscriptionChanges};
use crate::error::FieldViolation;
use crate::types::nullable_field;
use crate::utils::error_helper::collect_violations;
use crate::utils::validation::{is_structured_payload, parse_datetime, subscription, trim_field};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

const PAYLOAD_REQUIRED: &str = "The payload field is required.";
const PAYLOAD_NOT_OBJECT: &str = "The payload must be a JSON object.";
const EXPIRED_AT_INVALID: &str = "The expired at is not a valid date.";

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Default, Validate)]
pub struct CreateSubscriptionDto {
    #[validate(
        required(message = "The service field is required."),
        length(
            min = subscription::SERVICE_MIN_LENGTH,
            max = subscription::SERVICE_MAX_LENGTH,
            message = "The service must be between 1 and 255 characters."
        )
    )]
    pub service: Option<String>,

    #[validate(
        required(message = "The topic field is required."),
        length(
            min = subscription::TOPIC_MIN_LENGTH,
            max = subscription::TOPIC_MAX_LENGTH,
            message = "The topic must be between 1 and 255 characters."
        )
    )]
    pub topic: Option<String>,

    // JSON の null も「未指定」と同じく必須違反
    pub payload: Option<Value>,

    pub expired_at: Option<String>,

    #[validate(required(message = "The subscriber id field is required."))]
    pub subscriber_id: Option<i32>,
}

impl CreateSubscriptionDto {
    pub fn normalized(mut self) -> Self {
        trim_field(&mut self.service);
        trim_field(&mut self.topic);
        self
    }

    /// 入力形式のみの検証。subscriber_id の存在確認はサービス層で行う
    pub fn violations(&self) -> Vec<FieldViolation> {
        let mut violations = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => collect_violations(&errors),
        };

        match &self.payload {
            None => violations.push(FieldViolation::new("payload", PAYLOAD_REQUIRED)),
            Some(payload) if !is_structured_payload(payload) => {
                violations.push(FieldViolation::new("payload", PAYLOAD_NOT_OBJECT))
            }
            Some(_) => {}
        }

        if let Some(expired_at) = &self.expired_at {
            if parse_datetime(expired_at).is_none() {
                violations.push(FieldViolation::new("expired_at", EXPIRED_AT_INVALID));
            }
        }

        violations.sort_by(|a, b| a.field.cmp(&b.field));
        violations
    }

    /// violations() が空であることを確認した後に呼ぶ
    pub fn into_new_subscription(self) -> Option<NewSubscription> {
        let expired_at = match self.expired_at {
            Some(raw) => Some(parse_datetime(&raw)?),
            None => None,
        };

        Some(NewSubscription {
            service: self.service?,
            topic: self.topic?,
            payload: self.payload?,
            expired_at,
            subscriber_id: self.subscriber_id?,
        })
    }
}

/// 部分更新。subscriber_id は受け取っても無視する
#[derive(Deserialize, Serialize, Debug, Default, Validate)]
pub struct UpdateSubscriptionDto {
    #[validate(length(
        min = subscription::SERVICE_MIN_LENGTH,
        max = subscription::SERVICE_MAX_LENGTH,
        message = "The service must be between 1 and 255 characters."
    ))]
    pub service: Option<String>,

    #[validate(length(
        min = subscription::TOPIC_MIN_LENGTH,
        max = subscription::TOPIC_MAX_LENGTH,
        message = "The topic must be between 1 and 255 characters."
    ))]
    pub topic: Option<String>,

    #[serde(default, deserialize_with = "nullable_field")]
    pub payload: Option<Option<Value>>,

    /// 未指定は変更なし、null は期限のクリア
    #[serde(default, deserialize_with = "nullable_field")]
    pub expired_at: Option<Option<String>>,
}

impl UpdateSubscriptionDto {
    pub fn normalized(mut self) -> Self {
        trim_field(&mut self.service);
        trim_field(&mut self.topic);
        self
    }

    pub fn violations(&self) -> Vec<FieldViolation> {
        let mut violations = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => collect_violations(&errors),
        };

        match &self.payload {
            Some(None) => violations.push(FieldViolation::new("payload", PAYLOAD_REQUIRED)),
            Some(Some(payload)) if !is_structured_payload(payload) => {
                violations.push(FieldViolation::new("payload", PAYLOAD_NOT_OBJECT))
            }
            _ => {}
        }

        if let Some(Some(expired_at)) = &self.expired_at {
            if parse_datetime(expired_at).is_none() {
                violations.push(FieldViolation::new("expired_at", EXPIRED_AT_INVALID));
            }
        }

        violations.sort_by(|a, b| a.field.cmp(&b.field));
        violations
    }

    /// violations() が空であることを確認した後に呼ぶ
    pub fn into_changes(self) -> Option<SubscriptionChanges> {
        let expired_at = match self.expired_at {
            Some(Some(raw)) => Some(Some(parse_datetime(&raw)?)),
            Some(None) => Some(None),
            None => None,
        };

        let payload = match self.payload {
            Some(Some(payload)) => Some(payload),
            Some(None) => return None,
            None => None,
        };

        Some(SubscriptionChanges {
            service: self.service,
            topic: self.topic,
            payload,
            expired_at,
        })
    }
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubscriptionDto {
    pub id: i32,
    pub service: String,
    pub topic: String,
    pub payload: Value,
    pub expired_at: Option<DateTime<Utc>>,
    pub subscriber_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<subscription_model::Model> for SubscriptionDto {
    fn from(model: subscription_model::Model) -> Self {
        Self {
            id: model.id,
            service: model.service,
            topic: model.topic,
            payload: model.payload,
            expired_at: model.expired_at,
            subscriber_id: model.subscriber_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub type PaginatedSubscriptionsDto = PaginatedResponse<SubscriptionDto>;
