// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, error};

/// フィールド単位のバリデーション違反
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Validation failed")]
    ValidationErrors(Vec<FieldViolation>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// 単一フィールドのバリデーションエラー
    pub fn validation(field: &str, message: &str) -> Self {
        AppError::ValidationErrors(vec![FieldViolation::new(field, message)])
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DbErr(DbErr::RecordNotFound(_)) | AppError::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::DbErr(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ValidationErrors(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = match self {
            AppError::DbErr(DbErr::RecordNotFound(entity)) => {
                debug!(entity = %entity, "Record not found");
                ErrorResponse::new("The requested resource was not found", "not_found")
            }
            AppError::DbErr(db_err) => {
                // サーバーログには詳細を出し、クライアントには出さない
                error!(error = ?db_err, "Database error");
                ErrorResponse::new("An internal server error occurred", "internal_server_error")
            }
            AppError::NotFound(detail) => {
                debug!(detail = %detail, "Resource not found");
                ErrorResponse::new("The requested resource was not found", "not_found")
            }
            AppError::ValidationErrors(violations) => {
                let mut field_errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
                for violation in violations {
                    field_errors
                        .entry(violation.field)
                        .or_default()
                        .push(violation.message);
                }
                ErrorResponse {
                    validation_errors: Some(field_errors),
                    ..ErrorResponse::new("Validation failed", "validation_errors")
                }
            }
            AppError::Unauthorized(message) => ErrorResponse::new(message, "unauthorized"),
            AppError::InternalServerError(message) => {
                error!(message = %message, "Internal server error");
                ErrorResponse::new("An internal server error occurred", "internal_server_error")
            }
        };

        (status, Json(error_response)).into_response()
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;

/// 統一的なエラーレスポンス構造
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<BTreeMap<String, Vec<String>>>,
    pub error_type: String,
}

impl ErrorResponse {
    fn new(message: impl Into<String>, error_type: &str) -> Self {
        let message = message.into();
        Self {
            success: false,
            error: message.clone(),
            message,
            validation_errors: None,
            error_type: error_type.to_string(),
        }
    }
}
