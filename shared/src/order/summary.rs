//! Order-level reconciliation summary
//!
//! Both read paths (multi-payment ledger and legacy single-payment header)
//! produce this exact shape so callers never branch on which path ran.

use serde::{Deserialize, Serialize};

/// Denormalized order summary
///
/// For multi-payment orders this is a cache recomputed from the live
/// Player/Payment tables on every ledger mutation; it is never authoritative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OrderSummary {
    pub total_original_amount: f64,
    pub total_discount_amount: f64,
    pub total_final_amount: f64,
    pub players_with_discount: u32,
    pub players_without_discount: u32,
    /// Sum over confirmed payments
    pub paid_amount: f64,
    /// Sum over pending (not yet confirmed) payments
    pub pending_amount: f64,
    /// `total_discount / total_original * 100`, 0 when original is 0
    pub discount_percent: f64,
    /// Paid vs final total, clamped to 100
    pub completion_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_payment_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_payment_at: Option<i64>,
    pub payments_total: u32,
    /// True when player-level figures were synthesized by an equal split of
    /// the header total (single-payment path), not measured from a ledger
    #[serde(default)]
    pub synthesized: bool,
}

impl OrderSummary {
    pub fn is_settled(&self) -> bool {
        self.completion_percent >= 100.0
    }
}
