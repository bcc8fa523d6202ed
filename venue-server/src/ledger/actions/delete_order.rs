//! DeleteOrder action
//!
//! Cascades to the order's players and payments in the same transaction.

use crate::ledger::context::{ActionEffect, LedgerAction, LedgerContext, LedgerResult};

pub struct DeleteOrderAction {
    pub order_id: String,
}

impl LedgerAction for DeleteOrderAction {
    type Output = ();

    fn execute(&self, ctx: &mut LedgerContext<'_>) -> LedgerResult<ActionEffect<()>> {
        ctx.require_order(&self.order_id)?;
        ctx.remove_order_cascade(&self.order_id)?;

        tracing::info!(order_id = %self.order_id, "order deleted with players and payments");

        // Nothing left to reconcile
        Ok(ActionEffect::detached(()))
    }
}
