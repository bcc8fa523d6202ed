//! ConfirmPayment action
//!
//! The only transition that affects covered players' status. The action
//! marks the payment confirmed; the manager's reconcile pass then recomputes
//! every covered player from the sum of all confirmed payments covering it
//! (not just this one) inside the same transaction. Re-confirmation is
//! rejected, so confirming twice can never double-count.

use crate::ledger::context::{ActionEffect, LedgerAction, LedgerContext, LedgerError, LedgerResult};
use shared::order::{Payment, PaymentStatus};

pub struct ConfirmPaymentAction {
    pub payment_id: String,
}

impl LedgerAction for ConfirmPaymentAction {
    type Output = Payment;

    fn execute(&self, ctx: &mut LedgerContext<'_>) -> LedgerResult<ActionEffect<Payment>> {
        let mut payment = ctx.require_payment(&self.payment_id)?;
        match payment.status {
            PaymentStatus::Pending => {}
            PaymentStatus::Confirmed => {
                return Err(LedgerError::AlreadyConfirmed(self.payment_id.clone()));
            }
            PaymentStatus::Cancelled | PaymentStatus::Failed => {
                return Err(LedgerError::PaymentNotPending(self.payment_id.clone()));
            }
        }

        payment.status = PaymentStatus::Confirmed;
        payment.confirmed_at = Some(ctx.now());
        ctx.store_payment(&payment)?;

        tracing::info!(
            order_id = %payment.order_id,
            payment_id = %payment.id,
            amount = payment.amount,
            "payment confirmed"
        );

        let order_id = payment.order_id.clone();
        Ok(ActionEffect::new(payment, order_id))
    }
}
