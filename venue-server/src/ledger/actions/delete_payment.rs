//! DeletePayment action
//!
//! Removes the record entirely. Covered players are not deleted; the
//! reconcile pass recomputes their status as if the payment had never
//! existed.

use crate::ledger::context::{ActionEffect, LedgerAction, LedgerContext, LedgerResult};
use shared::order::Payment;

pub struct DeletePaymentAction {
    pub payment_id: String,
}

impl LedgerAction for DeletePaymentAction {
    type Output = Payment;

    fn execute(&self, ctx: &mut LedgerContext<'_>) -> LedgerResult<ActionEffect<Payment>> {
        let payment = ctx.require_payment(&self.payment_id)?;
        ctx.remove_payment(&payment.order_id, &payment.id)?;

        tracing::info!(
            order_id = %payment.order_id,
            payment_id = %payment.id,
            status = ?payment.status,
            "payment deleted"
        );

        let order_id = payment.order_id.clone();
        Ok(ActionEffect::new(payment, order_id))
    }
}
