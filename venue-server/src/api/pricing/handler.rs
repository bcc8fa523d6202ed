//! Pricing preview handlers

use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::auth::Actor;
use crate::core::ServerState;
use crate::ledger::money::{to_decimal, to_f64};
use crate::utils::AppResult;
use rust_decimal::Decimal;
use shared::order::{DiscountOutcome, PaymentItem, RoleSelection};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecomposeRequest {
    pub store_id: String,
    pub booking_date: NaiveDate,
    pub unit_price: f64,
    pub player_count: u32,
    #[serde(default)]
    pub role_selections: Vec<RoleSelection>,
}

#[derive(Debug, Serialize)]
pub struct DecomposePreview {
    pub items: Vec<PaymentItem>,
    pub total_original_amount: f64,
    pub total_discount_amount: f64,
    pub total_final_amount: f64,
}

/// POST /api/pricing/preview - 价格分解预览
pub async fn preview_decompose(
    State(state): State<ServerState>,
    actor: Actor,
    Json(req): Json<DecomposeRequest>,
) -> AppResult<Json<DecomposePreview>> {
    actor.ensure_store_access(&req.store_id)?;

    let items = state
        .decomposer
        .decompose(
            &actor.company_id,
            &req.store_id,
            req.booking_date,
            req.unit_price,
            req.player_count,
            &req.role_selections,
        )
        .await?;

    // Totals are sums of the already-rounded items; re-deriving them from an
    // unrounded total would drift by a cent.
    let total_original: Decimal = items.iter().map(|i| to_decimal(i.original_amount)).sum();
    let total_discount: Decimal = items.iter().map(|i| to_decimal(i.discount_amount)).sum();
    let total_final: Decimal = items.iter().map(|i| to_decimal(i.final_amount)).sum();

    Ok(Json(DecomposePreview {
        items,
        total_original_amount: to_f64(total_original),
        total_discount_amount: to_f64(total_discount),
        total_final_amount: to_f64(total_final),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleDiscountRequest {
    pub store_id: String,
    pub template_id: String,
    pub amount: f64,
    pub as_of: NaiveDate,
}

/// POST /api/pricing/role-discount - 角色折扣预览
pub async fn preview_role_discount(
    State(state): State<ServerState>,
    actor: Actor,
    Json(req): Json<RoleDiscountRequest>,
) -> AppResult<Json<DiscountOutcome>> {
    actor.ensure_store_access(&req.store_id)?;
    let outcome = state
        .resolver
        .resolve_role_discount(
            &actor.company_id,
            &req.store_id,
            &req.template_id,
            req.amount,
            req.as_of,
        )
        .await;
    Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarDiscountRequest {
    pub store_id: String,
    pub date: NaiveDate,
    pub amount: f64,
}

/// POST /api/pricing/calendar-discount - 日历折扣预览
pub async fn preview_calendar_discount(
    State(state): State<ServerState>,
    actor: Actor,
    Json(req): Json<CalendarDiscountRequest>,
) -> AppResult<Json<DiscountOutcome>> {
    actor.ensure_store_access(&req.store_id)?;
    let outcome = state
        .resolver
        .resolve_calendar_discount(&actor.company_id, &req.store_id, req.date, req.amount)
        .await;
    Ok(Json(outcome))
}
