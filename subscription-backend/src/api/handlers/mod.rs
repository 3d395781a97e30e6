// src/api/handlers/mod.rs
pub mod subscriber_handler;
pub mod subscription_handler;
pub mod system_handler;
pub mod user_handler;
