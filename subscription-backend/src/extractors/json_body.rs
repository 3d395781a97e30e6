// src/extractors/json_body.rs
use crate::error::AppError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// JSON ボディの抽出
///
/// axum 標準の Json と同じだが、拒否時は `body` フィールドの
/// バリデーションエラー (422) として返す。
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::debug!(rejection = %rejection.body_text(), "JSON body rejected");
                Err(AppError::validation("body", rejection_message(&rejection)))
            }
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "The request body must be sent as application/json."
        }
        JsonRejection::JsonSyntaxError(_) => "The request body is not valid JSON.",
        JsonRejection::JsonDataError(_) => "The request body has a field of the wrong type.",
        _ => "The request body could not be read.",
    }
}
