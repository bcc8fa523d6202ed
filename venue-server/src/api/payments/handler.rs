//! Payment Ledger API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::auth::Actor;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppResult};
use shared::order::{MergeTarget, Payment, PaymentChanges, PaymentDraft, SplitSpec};

/// Load a payment and check the tenant boundary through its order
async fn guarded_payment(
    state: &ServerState,
    actor: &Actor,
    payment_id: &str,
) -> AppResult<Payment> {
    let payment = state.ledger.get_payment(payment_id)?;
    let order = state.ledger.get_order(&payment.order_id)?;
    actor.ensure_company(&order.company_id)?;
    Ok(payment)
}

/// GET /api/orders/{id}/payments
pub async fn list(
    State(state): State<ServerState>,
    actor: Actor,
    Path(order_id): Path<String>,
) -> AppResult<Json<Vec<Payment>>> {
    let order = state.ledger.get_order(&order_id)?;
    actor.ensure_company(&order.company_id)?;
    Ok(Json(state.ledger.get_payments(&order_id)?))
}

/// POST /api/orders/{id}/payments - 录入支付
pub async fn create(
    State(state): State<ServerState>,
    actor: Actor,
    Path(order_id): Path<String>,
    Json(draft): Json<PaymentDraft>,
) -> AppResult<Json<Payment>> {
    let order = state.ledger.get_order(&order_id)?;
    actor.ensure_company(&order.company_id)?;

    let outcome = state.ledger.create_payment(&order_id, draft)?;
    Ok(Json(outcome.value))
}

/// PUT /api/payments/{id} - 编辑待确认支付
pub async fn update(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<String>,
    Json(changes): Json<PaymentChanges>,
) -> AppResult<Json<Payment>> {
    actor.ensure_permission("payments:record")?;
    guarded_payment(&state, &actor, &id).await?;

    let outcome = state.ledger.update_payment(&id, changes)?;
    Ok(Json(outcome.value))
}

/// POST /api/payments/{id}/confirm - 确认收款
pub async fn confirm(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<String>,
) -> AppResult<Json<Payment>> {
    guarded_payment(&state, &actor, &id).await?;

    let outcome = state.ledger.confirm_payment(&id)?;
    Ok(Json(outcome.value))
}

#[derive(Debug, Deserialize, Default)]
pub struct CancelRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

/// POST /api/payments/{id}/cancel
pub async fn cancel(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<String>,
    Json(req): Json<CancelRequest>,
) -> AppResult<Json<Payment>> {
    guarded_payment(&state, &actor, &id).await?;

    let outcome = state.ledger.cancel_payment(&id, req.reason)?;
    Ok(Json(outcome.value))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeRequest {
    pub order_id: String,
    pub payment_ids: Vec<String>,
    #[serde(default)]
    pub target: MergeTarget,
}

/// POST /api/payments/merge - 合并支付
pub async fn merge(
    State(state): State<ServerState>,
    actor: Actor,
    Json(req): Json<MergeRequest>,
) -> AppResult<Json<Payment>> {
    let order = state.ledger.get_order(&req.order_id)?;
    actor.ensure_company(&order.company_id)?;

    let outcome = state
        .ledger
        .merge_payments(&req.order_id, req.payment_ids, req.target)?;
    Ok(Json(outcome.value))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitRequest {
    pub specs: Vec<SplitSpec>,
}

/// POST /api/payments/{id}/split - 拆分支付
///
/// 拆分金额与原支付不一致时照常成功，差额以软警告返回。
pub async fn split(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<String>,
    Json(req): Json<SplitRequest>,
) -> AppResult<Json<ApiResponse<Vec<Payment>>>> {
    guarded_payment(&state, &actor, &id).await?;

    let outcome = state.ledger.split_payment(&id, req.specs)?;
    Ok(Json(ApiResponse::ok_with_warnings(outcome.value, outcome.warnings)))
}

/// DELETE /api/payments/{id} - 删除支付（重新核算玩家状态）
pub async fn delete(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    actor.ensure_permission("payments:adjust")?;
    guarded_payment(&state, &actor, &id).await?;

    state.ledger.delete_payment(&id)?;
    Ok(Json(true))
}
