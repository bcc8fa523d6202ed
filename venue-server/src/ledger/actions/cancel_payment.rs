//! CancelPayment / FailPayment actions
//!
//! Terminal transitions out of the pending state. Neither ever affected
//! player status (only confirmed payments count), so the reconcile pass is
//! a no-op for players and only refreshes the pending-amount aggregates.

use crate::ledger::context::{ActionEffect, LedgerAction, LedgerContext, LedgerError, LedgerResult};
use shared::order::{Payment, PaymentStatus};

pub struct CancelPaymentAction {
    pub payment_id: String,
    pub reason: Option<String>,
}

impl LedgerAction for CancelPaymentAction {
    type Output = Payment;

    fn execute(&self, ctx: &mut LedgerContext<'_>) -> LedgerResult<ActionEffect<Payment>> {
        let mut payment = ctx.require_payment(&self.payment_id)?;
        if !payment.is_pending() {
            return Err(LedgerError::PaymentNotPending(self.payment_id.clone()));
        }

        payment.status = PaymentStatus::Cancelled;
        payment.cancel_reason = self.reason.clone();
        ctx.store_payment(&payment)?;

        tracing::info!(
            order_id = %payment.order_id,
            payment_id = %payment.id,
            reason = ?self.reason,
            "payment cancelled"
        );

        let order_id = payment.order_id.clone();
        Ok(ActionEffect::new(payment, order_id))
    }
}

pub struct FailPaymentAction {
    pub payment_id: String,
    pub reason: Option<String>,
}

impl LedgerAction for FailPaymentAction {
    type Output = Payment;

    fn execute(&self, ctx: &mut LedgerContext<'_>) -> LedgerResult<ActionEffect<Payment>> {
        let mut payment = ctx.require_payment(&self.payment_id)?;
        if !payment.is_pending() {
            return Err(LedgerError::PaymentNotPending(self.payment_id.clone()));
        }

        payment.status = PaymentStatus::Failed;
        payment.cancel_reason = self.reason.clone();
        ctx.store_payment(&payment)?;

        let order_id = payment.order_id.clone();
        Ok(ActionEffect::new(payment, order_id))
    }
}
