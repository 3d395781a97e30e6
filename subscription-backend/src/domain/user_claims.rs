// src/domain/user_claims.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT に埋め込む認証済みユーザー情報
///
/// ユーザーの管理は外部の認証基盤が担うため、このサービスはトークンの内容のみを信頼する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
}
