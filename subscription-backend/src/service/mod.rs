// src/service/mod.rs
pub mod subscriber_service;
pub mod subscription_service;
