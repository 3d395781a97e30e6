// src/api/dto/mod.rs
pub mod subscriber_dto;
pub mod subscription_dto;
pub mod user_dto;

// Re-export common response types
pub use crate::shared::types::{PageQuery, PaginatedResponse, PaginationMeta};
