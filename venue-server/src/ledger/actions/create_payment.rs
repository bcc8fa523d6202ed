//! CreatePayment action

use crate::ledger::context::{ActionEffect, LedgerAction, LedgerContext, LedgerResult};
use crate::ledger::money::validate_payment_draft;
use shared::order::{Payment, PaymentDraft, PaymentStatus};

/// Record a new pending payment against an order's players
///
/// The amount is not required to equal the covered players' final amounts;
/// partial and over payments are reconciled at confirmation time.
pub struct CreatePaymentAction {
    pub order_id: String,
    pub draft: PaymentDraft,
}

impl LedgerAction for CreatePaymentAction {
    type Output = Payment;

    fn execute(&self, ctx: &mut LedgerContext<'_>) -> LedgerResult<ActionEffect<Payment>> {
        validate_payment_draft(&self.draft)?;

        ctx.require_ledger_order(&self.order_id)?;
        let player_ids = ctx.require_players_exist(&self.order_id, &self.draft.player_ids)?;

        let payment = Payment {
            id: uuid::Uuid::new_v4().to_string(),
            order_id: self.order_id.clone(),
            payer: self.draft.payer.clone(),
            amount: self.draft.amount,
            method: self.draft.method.clone(),
            status: PaymentStatus::Pending,
            player_ids,
            proof_refs: self.draft.proof_refs.clone(),
            note: self.draft.note.clone(),
            cancel_reason: None,
            created_at: ctx.now(),
            confirmed_at: None,
        };
        ctx.store_payment(&payment)?;

        tracing::info!(
            order_id = %self.order_id,
            payment_id = %payment.id,
            amount = payment.amount,
            players = payment.player_ids.len(),
            "payment recorded"
        );

        Ok(ActionEffect::new(payment, self.order_id.clone()))
    }
}
