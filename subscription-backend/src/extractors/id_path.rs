// src/extractors/id_path.rs
use crate::error::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// パスパラメータから整数 ID を抽出する
///
/// 整数として解釈できないセグメントは存在しないレコードとして 404 を返す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::NotFound(format!("Missing id path parameter: {}", e)))?;

        parse_id(&raw)
            .map(IdPath)
            .ok_or_else(|| AppError::NotFound(format!("Invalid id '{}'", raw)))
    }
}

fn parse_id(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok()
}
