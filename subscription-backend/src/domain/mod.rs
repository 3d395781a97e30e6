// src/domain/mod.rs
pub mod subscriber_model;
pub mod subscription_model;
pub mod user_claims;
