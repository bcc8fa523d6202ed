//! 支付台账 API 模块
//!
//! `/api/payments/{id}` 的 PUT/DELETE 权限不同（录入 vs 调整），
//! 在 handler 内部检查，其余路由在路由层统一加权限中间件。

mod handler;

use axum::{Router, middleware, routing::get, routing::post, routing::put};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let read_routes = Router::new().route("/api/orders/{id}/payments", get(handler::list));

    let id_routes = Router::new()
        .route("/api/payments/{id}", put(handler::update).delete(handler::delete));

    let record_routes = Router::new()
        .route("/api/orders/{id}/payments", post(handler::create))
        .route("/api/payments/{id}/cancel", post(handler::cancel))
        .layer(middleware::from_fn(require_permission("payments:record")));

    let confirm_routes = Router::new()
        .route("/api/payments/{id}/confirm", post(handler::confirm))
        .layer(middleware::from_fn(require_permission("payments:confirm")));

    let adjust_routes = Router::new()
        .route("/api/payments/merge", post(handler::merge))
        .route("/api/payments/{id}/split", post(handler::split))
        .layer(middleware::from_fn(require_permission("payments:adjust")));

    read_routes
        .merge(id_routes)
        .merge(record_routes)
        .merge(confirm_routes)
        .merge(adjust_routes)
}
