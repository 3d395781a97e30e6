// src/shared/types/mod.rs
pub mod pagination;

pub use pagination::{PageQuery, PaginatedResponse, PaginationMeta};
