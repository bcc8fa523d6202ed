//! CreateOrder action
//!
//! Seeds an order and, for multi-payment orders, one Player per seat from
//! the price decomposition.

use crate::ledger::context::{ActionEffect, LedgerAction, LedgerContext, LedgerError, LedgerResult};
use shared::order::{Order, OrderDraft, PaymentItem, Player};

pub struct CreateOrderAction {
    pub draft: OrderDraft,
    /// Decomposition output; empty for single-payment orders (and for
    /// zero-priced or zero-seat multi-payment orders)
    pub items: Vec<PaymentItem>,
}

impl LedgerAction for CreateOrderAction {
    type Output = Order;

    fn execute(&self, ctx: &mut LedgerContext<'_>) -> LedgerResult<ActionEffect<Order>> {
        let draft = &self.draft;
        if draft.company_id.trim().is_empty() || draft.store_id.trim().is_empty() {
            return Err(LedgerError::Validation(
                "company_id and store_id are required".to_string(),
            ));
        }
        if !draft.unit_price.is_finite() || draft.unit_price < 0.0 {
            return Err(LedgerError::Validation(format!(
                "unit_price must be a non-negative number, got {}",
                draft.unit_price
            )));
        }

        if draft.enable_multi_payment {
            let expect_items = draft.unit_price > 0.0 && draft.player_count > 0;
            if expect_items && self.items.len() != draft.player_count as usize {
                return Err(LedgerError::Validation(format!(
                    "decomposition produced {} items for {} players",
                    self.items.len(),
                    draft.player_count
                )));
            }
        } else if !self.items.is_empty() {
            return Err(LedgerError::Validation(
                "single-payment orders carry no decomposition items".to_string(),
            ));
        }

        let order_id = uuid::Uuid::new_v4().to_string();
        let order = Order::from_draft(order_id.clone(), draft, ctx.now());
        ctx.store_order(&order)?;

        for item in &self.items {
            let player = Player::from_item(uuid::Uuid::new_v4().to_string(), &order_id, item);
            ctx.store_player(&player)?;
        }

        tracing::info!(
            order_id = %order_id,
            players = self.items.len(),
            multi_payment = draft.enable_multi_payment,
            "order created"
        );

        Ok(ActionEffect::new(order, order_id))
    }
}
