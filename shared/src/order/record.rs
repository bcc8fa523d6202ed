//! Order header record

use super::summary::OrderSummary;
use super::types::{CustomerInfo, HeaderPaymentStatus, OrderDraft};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The booking header
///
/// `enable_multi_payment` selects the reconciliation path: when set, the
/// order carries one Player per seat plus a Payment ledger and the summary
/// block is a recomputed cache; when unset, the header fields
/// (`total_amount`, `payment_status`, `deposit_amount`) are the source of
/// truth and player-level figures are synthesized for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    pub company_id: String,
    pub store_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerInfo>,
    pub booking_date: NaiveDate,
    pub unit_price: f64,
    pub player_count: u32,
    #[serde(default)]
    pub enable_multi_payment: bool,
    /// Header total (single-payment path)
    pub total_amount: f64,
    /// Deposit collected so far (single-payment path, `DEPOSIT` state)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_amount: Option<f64>,
    /// Header tri-state (single-payment path)
    #[serde(default)]
    pub payment_status: HeaderPaymentStatus,
    /// Denormalized summary cache, refreshed on every ledger mutation
    #[serde(default)]
    pub summary: OrderSummary,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Order {
    /// Build an order header from a draft
    ///
    /// The summary cache starts empty; the ledger refreshes it in the same
    /// transaction that seeds the players.
    pub fn from_draft(id: String, draft: &OrderDraft, now: i64) -> Self {
        let total_amount = draft
            .total_amount
            .unwrap_or(draft.unit_price * draft.player_count as f64);
        Self {
            id,
            company_id: draft.company_id.clone(),
            store_id: draft.store_id.clone(),
            customer: draft.customer.clone(),
            booking_date: draft.booking_date,
            unit_price: draft.unit_price,
            player_count: draft.player_count,
            enable_multi_payment: draft.enable_multi_payment,
            total_amount,
            deposit_amount: draft.deposit_amount,
            payment_status: draft.payment_status,
            summary: OrderSummary::default(),
            created_at: now,
            updated_at: now,
        }
    }
}
