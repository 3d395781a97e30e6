// src/api/dto/user_dto.rs
use crate::domain::user_claims::UserClaims;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 認証済みプリンシパル
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CurrentUserDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<UserClaims> for CurrentUserDto {
    fn from(claims: UserClaims) -> Self {
        Self {
            id: claims.user_id,
            username: claims.username,
            email: claims.email,
        }
    }
}
