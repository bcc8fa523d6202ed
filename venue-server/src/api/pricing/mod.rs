//! 价格预览 API 模块
//!
//! "这单会花多少钱" — read-only preview endpoints used by the booking UI
//! before committing an order.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pricing", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/preview", post(handler::preview_decompose))
        .route("/role-discount", post(handler::preview_role_discount))
        .route("/calendar-discount", post(handler::preview_calendar_discount))
}
