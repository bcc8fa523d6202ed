//! Payment record - one money movement in the ledger

use super::types::{PayerInfo, PaymentStatus};
use serde::{Deserialize, Serialize};

/// One payment covering a subset of an order's players
///
/// A payment may cover 1..N players, and a player may be covered by more
/// than one payment over time (e.g. deposit + balance).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: String,
    pub order_id: String,
    pub payer: PayerInfo,
    pub amount: f64,
    pub method: String,
    #[serde(default)]
    pub status: PaymentStatus,
    /// Ids of the players this payment covers
    pub player_ids: Vec<String>,
    /// Opaque proof attachment references (receipt images etc.)
    #[serde(default)]
    pub proof_refs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<i64>,
}

impl Payment {
    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == PaymentStatus::Confirmed
    }

    pub fn covers(&self, player_id: &str) -> bool {
        self.player_ids.iter().any(|id| id == player_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Payment {
        Payment {
            id: "pay-1".into(),
            order_id: "order-1".into(),
            payer: PayerInfo { name: "Kim".into(), phone: None },
            amount: 60_000.0,
            method: "CARD".into(),
            status: PaymentStatus::Pending,
            player_ids: vec!["pl-1".into(), "pl-2".into()],
            proof_refs: vec![],
            note: None,
            cancel_reason: None,
            created_at: 1_735_689_600_000,
            confirmed_at: None,
        }
    }

    #[test]
    fn test_covers() {
        let payment = sample();
        assert!(payment.covers("pl-1"));
        assert!(!payment.covers("pl-3"));
    }

    #[test]
    fn test_status_helpers() {
        let mut payment = sample();
        assert!(payment.is_pending());
        payment.status = PaymentStatus::Confirmed;
        assert!(payment.is_confirmed());
        assert!(!payment.is_pending());
    }
}
