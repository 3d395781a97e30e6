// src/utils/error_helper.rs

//! エラーハンドリングの統一化ヘルパー

use crate::error::{AppError, FieldViolation};
use sea_orm::{DbErr, SqlErr};
use tracing::{error, warn};
use validator::ValidationErrors;

/// validator の ValidationErrors をフィールド違反の一覧に変換する
pub fn collect_violations(validation_errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = validation_errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| format!("The {} field is invalid.", field), |m| m.to_string());
                FieldViolation::new(field.to_string(), message)
            })
        })
        .collect();

    // field_errors() は HashMap 由来で順序が不定なためフィールド名で揃える
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    violations
}

/// 違反があれば ValidationErrors として返す
pub fn ensure_valid(violations: Vec<FieldViolation>, context: &str) -> Result<(), AppError> {
    if violations.is_empty() {
        return Ok(());
    }

    warn!(
        context = %context,
        error_count = violations.len(),
        "Validation failed"
    );
    Err(AppError::ValidationErrors(violations))
}

/// ストアの制約違反をバリデーションエラーへ変換する
///
/// 事前チェックをすり抜けた一意制約・外部キー制約違反を、
/// 指定フィールドの違反として返す。それ以外の DB エラーはそのまま。
pub fn map_constraint_violation(
    err: DbErr,
    context: &str,
    unique_field: Option<(&str, &str)>,
    foreign_key_field: Option<(&str, &str)>,
) -> AppError {
    match (err.sql_err(), unique_field, foreign_key_field) {
        (Some(SqlErr::UniqueConstraintViolation(detail)), Some((field, message)), _) => {
            warn!(context = %context, detail = %detail, "Unique constraint violation");
            AppError::validation(field, message)
        }
        (Some(SqlErr::ForeignKeyConstraintViolation(detail)), _, Some((field, message))) => {
            warn!(context = %context, detail = %detail, "Foreign key constraint violation");
            AppError::validation(field, message)
        }
        _ => internal_db_error(err, context),
    }
}

/// DB エラーをログ付きで AppError に変換
pub fn internal_db_error(err: DbErr, context: &str) -> AppError {
    error!(
        error = %err,
        context = %context,
        "Database operation failed"
    );
    AppError::DbErr(err)
}
