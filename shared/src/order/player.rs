//! Player record - one seat of an order

use super::discount::{AppliedDiscount, PaymentItem, TemplateSnapshot};
use super::types::PlayerPaymentStatus;
use serde::{Deserialize, Serialize};

/// One seat's worth of the order, carrying its own price and discount
///
/// The discount terms are a frozen snapshot (see [`TemplateSnapshot`]);
/// `role_template_id` is kept only as a soft back-reference for listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: String,
    pub order_id: String,
    /// 1-based sequence number, unique within the order
    pub seq: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_template_id: Option<String>,
    /// Discount terms frozen at decomposition time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateSnapshot>,
    #[serde(default)]
    pub applied: Vec<AppliedDiscount>,
    pub original_amount: f64,
    pub discount_amount: f64,
    /// `max(0, original - discount)`, rounded to 2 decimal places
    pub final_amount: f64,
    #[serde(default)]
    pub payment_status: PlayerPaymentStatus,
}

impl Player {
    /// Build a player record from a decomposition item
    pub fn from_item(id: String, order_id: &str, item: &PaymentItem) -> Self {
        Self {
            id,
            order_id: order_id.to_string(),
            seq: item.seq,
            name: None,
            phone: None,
            role_template_id: item.template.as_ref().map(|t| t.template_id.clone()),
            template: item.template.clone(),
            applied: item.applied.clone(),
            original_amount: item.original_amount,
            discount_amount: item.discount_amount,
            final_amount: item.final_amount,
            payment_status: PlayerPaymentStatus::Pending,
        }
    }

    pub fn has_discount(&self) -> bool {
        self.discount_amount > 0.0
    }
}
