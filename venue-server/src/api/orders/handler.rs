//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::Actor;
use crate::core::ServerState;
use crate::ledger::manager::OrderDetail;
use crate::utils::AppResult;
use shared::order::{Order, OrderDraft, OrderSummary};

/// POST /api/orders - 创建订单
///
/// Multi-payment orders run through price decomposition first; the ledger is
/// seeded with one player per seat in the same transaction that stores the
/// header.
pub async fn create(
    State(state): State<ServerState>,
    actor: Actor,
    Json(mut draft): Json<OrderDraft>,
) -> AppResult<Json<Order>> {
    if draft.company_id.is_empty() {
        draft.company_id = actor.company_id.clone();
    }
    actor.ensure_company(&draft.company_id)?;
    actor.ensure_store_access(&draft.store_id)?;

    let items = if draft.enable_multi_payment {
        state
            .decomposer
            .decompose(
                &draft.company_id,
                &draft.store_id,
                draft.booking_date,
                draft.unit_price,
                draft.player_count,
                &draft.role_selections,
            )
            .await?
    } else {
        Vec::new()
    };

    let outcome = state.ledger.create_order(draft, items)?;
    Ok(Json(outcome.value))
}

/// GET /api/orders - 当前公司订单列表
pub async fn list(
    State(state): State<ServerState>,
    actor: Actor,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state
        .ledger
        .list_orders()?
        .into_iter()
        .filter(|o| o.company_id == actor.company_id)
        .filter(|o| actor.ensure_store_access(&o.store_id).is_ok())
        .collect();
    Ok(Json(orders))
}

/// GET /api/orders/{id} - 订单详情（两种对账路径同一结构）
pub async fn get_detail(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<String>,
) -> AppResult<Json<OrderDetail>> {
    let detail = state.ledger.get_order_detail(&id)?;
    actor.ensure_company(&detail.order.company_id)?;
    Ok(Json(detail))
}

/// GET /api/orders/{id}/summary - 订单汇总
pub async fn get_summary(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<String>,
) -> AppResult<Json<OrderSummary>> {
    let order = state.ledger.get_order(&id)?;
    actor.ensure_company(&order.company_id)?;
    let summary = state.ledger.get_order_summary(&id)?;
    Ok(Json(summary))
}

/// DELETE /api/orders/{id} - 删除订单（级联玩家与支付）
pub async fn delete(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let order = state.ledger.get_order(&id)?;
    actor.ensure_company(&order.company_id)?;

    state.ledger.delete_order(&id)?;
    Ok(Json(true))
}
