//! Shared enums and request payloads for the order ledger

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Discount Kinds
// ============================================================================

/// Role template discount kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    /// 百分比折扣 (value 50 = 50% off)
    Percentage,
    /// 固定金额减免
    Fixed,
    /// 免单
    Free,
}

/// Calendar entry discount kind (calendar rules never grant a free seat)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalendarDiscountKind {
    Percentage,
    Fixed,
}

impl From<CalendarDiscountKind> for DiscountKind {
    fn from(kind: CalendarDiscountKind) -> Self {
        match kind {
            CalendarDiscountKind::Percentage => DiscountKind::Percentage,
            CalendarDiscountKind::Fixed => DiscountKind::Fixed,
        }
    }
}

/// Calendar entry kind
///
/// When several entries apply to the same date they stack sequentially in
/// ascending priority order: Holiday, Weekend, Special, Promotion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalendarKind {
    Holiday,
    Weekend,
    Special,
    Promotion,
}

impl CalendarKind {
    /// Stacking priority (lower applies first)
    pub fn priority(&self) -> u8 {
        match self {
            Self::Holiday => 0,
            Self::Weekend => 1,
            Self::Special => 2,
            Self::Promotion => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Holiday => "holiday",
            Self::Weekend => "weekend",
            Self::Special => "special",
            Self::Promotion => "promotion",
        }
    }
}

// ============================================================================
// Statuses
// ============================================================================

/// Per-player payment status, derived from the confirmed payments covering it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerPaymentStatus {
    #[default]
    Pending,
    Partial,
    Paid,
    Refunded,
}

/// Payment record status
///
/// `Pending -> Confirmed | Cancelled | Failed`; all transitions are terminal.
/// A pending payment may still be edited before confirmation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Confirmed,
    Failed,
    Cancelled,
}

/// Header-level payment status for single-payment (legacy) orders
///
/// 整单三态：未付 / 定金 / 全款
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeaderPaymentStatus {
    #[default]
    NotYet,
    #[serde(alias = "DP")]
    Deposit,
    Full,
}

// ============================================================================
// Identity fragments
// ============================================================================

/// Customer contact on the order header
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CustomerInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Payer identity on a payment record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayerInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

// ============================================================================
// Request payloads
// ============================================================================

/// One role-template selection for price decomposition:
/// "this many seats use this template"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSelection {
    pub template_id: String,
    pub player_count: u32,
}

/// Draft for creating an order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderDraft {
    pub company_id: String,
    pub store_id: String,
    #[serde(default)]
    pub customer: Option<CustomerInfo>,
    pub booking_date: NaiveDate,
    pub unit_price: f64,
    pub player_count: u32,
    #[serde(default)]
    pub enable_multi_payment: bool,
    /// Role selections consumed by price decomposition (multi-payment orders)
    #[serde(default)]
    pub role_selections: Vec<RoleSelection>,
    /// Header total for single-payment orders; defaults to
    /// `unit_price * player_count` when absent
    #[serde(default)]
    pub total_amount: Option<f64>,
    /// Deposit already collected (single-payment orders in `DEPOSIT` state)
    #[serde(default)]
    pub deposit_amount: Option<f64>,
    #[serde(default)]
    pub payment_status: HeaderPaymentStatus,
}

/// Draft for creating a payment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaymentDraft {
    pub payer: PayerInfo,
    pub amount: f64,
    pub method: String,
    /// Players covered by this payment (1..N)
    pub player_ids: Vec<String>,
    #[serde(default)]
    pub proof_refs: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Typed update command for a pending payment
///
/// Every editable field is listed explicitly; unknown fields are rejected
/// instead of silently merged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PaymentChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<PayerInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Replaces the covered-player set when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_ids: Option<Vec<String>>,
    /// Replaces the proof attachment list when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_refs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One part of a payment split
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitSpec {
    pub amount: f64,
    pub player_ids: Vec<String>,
    #[serde(default)]
    pub payer: Option<PayerInfo>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Attributes for the payment produced by a merge
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct MergeTarget {
    #[serde(default)]
    pub payer: Option<PayerInfo>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_kind_priority_order() {
        assert!(CalendarKind::Holiday.priority() < CalendarKind::Weekend.priority());
        assert!(CalendarKind::Weekend.priority() < CalendarKind::Special.priority());
        assert!(CalendarKind::Special.priority() < CalendarKind::Promotion.priority());
    }

    #[test]
    fn test_header_status_accepts_dp_alias() {
        let status: HeaderPaymentStatus = serde_json::from_str("\"DP\"").unwrap();
        assert_eq!(status, HeaderPaymentStatus::Deposit);
        let status: HeaderPaymentStatus = serde_json::from_str("\"DEPOSIT\"").unwrap();
        assert_eq!(status, HeaderPaymentStatus::Deposit);
    }

    #[test]
    fn test_payment_changes_rejects_unknown_fields() {
        let result: Result<PaymentChanges, _> =
            serde_json::from_str(r#"{"amount": 10.0, "bogus": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_order_draft_defaults() {
        let draft: OrderDraft = serde_json::from_str(
            r#"{
                "company_id": "c1",
                "store_id": "s1",
                "booking_date": "2025-01-01",
                "unit_price": 100000.0,
                "player_count": 3
            }"#,
        )
        .unwrap();
        assert!(!draft.enable_multi_payment);
        assert!(draft.role_selections.is_empty());
        assert_eq!(draft.payment_status, HeaderPaymentStatus::NotYet);
    }
}
