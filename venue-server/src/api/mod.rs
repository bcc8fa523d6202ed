//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`pricing_templates`] - 角色定价模板管理接口
//! - [`pricing_calendar`] - 日历折扣管理接口
//! - [`pricing`] - 折扣/分解预览接口
//! - [`orders`] - 订单接口
//! - [`payments`] - 支付台账接口

pub mod health;
pub mod orders;
pub mod payments;
pub mod pricing;
pub mod pricing_calendar;
pub mod pricing_templates;

use crate::core::ServerState;
use axum::Router;

// Re-export common types for handlers
pub use crate::utils::{AppResult, ApiResponse};

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(pricing_templates::router())
        .merge(pricing_calendar::router())
        .merge(pricing::router())
        .merge(orders::router())
        .merge(payments::router())
        .with_state(state)
}
