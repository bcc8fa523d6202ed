//! UpdatePayment action
//!
//! A pending payment may be edited (amount, covered players, proof, payer,
//! method, note) before being confirmed. All other states are immutable.

use crate::ledger::context::{ActionEffect, LedgerAction, LedgerContext, LedgerError, LedgerResult};
use crate::ledger::money::validate_amount;
use shared::order::{Payment, PaymentChanges};

pub struct UpdatePaymentAction {
    pub payment_id: String,
    pub changes: PaymentChanges,
}

impl LedgerAction for UpdatePaymentAction {
    type Output = Payment;

    fn execute(&self, ctx: &mut LedgerContext<'_>) -> LedgerResult<ActionEffect<Payment>> {
        let mut payment = ctx.require_payment(&self.payment_id)?;
        if !payment.is_pending() {
            return Err(LedgerError::PaymentNotPending(self.payment_id.clone()));
        }

        let changes = &self.changes;
        if let Some(amount) = changes.amount {
            validate_amount(amount)?;
            payment.amount = amount;
        }
        if let Some(player_ids) = &changes.player_ids {
            if player_ids.is_empty() {
                return Err(LedgerError::CoverageInvalid(
                    "a payment must cover at least one player".to_string(),
                ));
            }
            payment.player_ids = ctx.require_players_exist(&payment.order_id, player_ids)?;
        }
        if let Some(payer) = &changes.payer {
            payment.payer = payer.clone();
        }
        if let Some(method) = &changes.method {
            payment.method = method.clone();
        }
        if let Some(proof_refs) = &changes.proof_refs {
            payment.proof_refs = proof_refs.clone();
        }
        if let Some(note) = &changes.note {
            payment.note = Some(note.clone());
        }

        ctx.store_payment(&payment)?;

        let order_id = payment.order_id.clone();
        Ok(ActionEffect::new(payment, order_id))
    }
}
