//! Discount provenance snapshots and decomposition items
//!
//! A [`TemplateSnapshot`] freezes a role template's terms at the moment it is
//! applied to a player, so later edits to the template never retroactively
//! change a booked player's price. [`AppliedDiscount`] records each discount
//! that contributed to an amount, for audit display.

use super::types::{DiscountKind, RoleSelection};
use serde::{Deserialize, Serialize};

/// Where a discount came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountSource {
    RoleTemplate,
    Calendar,
}

/// One applied discount record (snapshot, not a live reference)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedDiscount {
    pub source: DiscountSource,
    /// Id of the template or calendar entry, when it resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// Role name or calendar kind, for receipts/audit
    pub label: String,
    pub discount_kind: DiscountKind,
    /// Original rule value (50 = 50% or a fixed amount)
    pub discount_value: f64,
    /// Amount actually taken off by this discount
    pub calculated_amount: f64,
}

/// Immutable copy of a role template's terms at assignment time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateSnapshot {
    pub template_id: String,
    pub role_name: String,
    pub discount_kind: DiscountKind,
    pub discount_value: f64,
}

/// Result of resolving discounts against an amount
///
/// Resolution never fails: an unknown or inapplicable rule degrades to
/// "no discount applied" with an explanatory note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscountOutcome {
    pub original_amount: f64,
    pub discount_amount: f64,
    pub discounted_amount: f64,
    /// Every discount that contributed, in application order
    #[serde(default)]
    pub applied: Vec<AppliedDiscount>,
    /// Set when no discount applied, explaining why
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DiscountOutcome {
    /// "No discount applied" outcome: the amount passes through unchanged
    pub fn none(amount: f64, note: impl Into<String>) -> Self {
        Self {
            original_amount: amount,
            discount_amount: 0.0,
            discounted_amount: amount,
            applied: Vec::new(),
            note: Some(note.into()),
        }
    }

    pub fn is_discounted(&self) -> bool {
        !self.applied.is_empty() && self.discount_amount > 0.0
    }
}

/// One seat's worth of a decomposed order price
///
/// The decomposition engine emits one item per seat (not one per role
/// selection); this granularity is what lets the payment ledger cover any
/// subset of seats with any combination of payers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentItem {
    /// 1-based seat number, unique within the order
    pub seq: u32,
    pub original_amount: f64,
    pub discount_amount: f64,
    /// `max(0, original - discount)`, rounded to 2 decimal places
    pub final_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateSnapshot>,
    #[serde(default)]
    pub applied: Vec<AppliedDiscount>,
}

/// Validate that role selections do not assign more seats than exist
pub fn selections_fit(selections: &[RoleSelection], player_count: u32) -> bool {
    let assigned: u64 = selections.iter().map(|s| s.player_count as u64).sum();
    assigned <= player_count as u64
}
