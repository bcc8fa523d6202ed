//! SplitPayment action
//!
//! Inverse of merge: one payment becomes N, each with a caller-specified
//! amount and covered-player subset. The parts are not required to sum to
//! the original (a split may deliberately write off a discrepancy); when
//! they do not, the action succeeds with a reconciliation warning.

use crate::ledger::context::{ActionEffect, LedgerAction, LedgerContext, LedgerError, LedgerResult};
use crate::ledger::money::validate_split_specs;
use shared::order::{Payment, PaymentStatus, SplitSpec};

pub struct SplitPaymentAction {
    pub payment_id: String,
    pub specs: Vec<SplitSpec>,
}

impl LedgerAction for SplitPaymentAction {
    type Output = Vec<Payment>;

    fn execute(&self, ctx: &mut LedgerContext<'_>) -> LedgerResult<ActionEffect<Vec<Payment>>> {
        let original = ctx.require_payment(&self.payment_id)?;
        if original.status != PaymentStatus::Pending && original.status != PaymentStatus::Confirmed
        {
            return Err(LedgerError::PaymentNotPending(self.payment_id.clone()));
        }

        let warning = validate_split_specs(original.amount, &self.specs)?;

        // Each part covers a subset of the original coverage
        for spec in &self.specs {
            for player_id in &spec.player_ids {
                if !original.covers(player_id) {
                    return Err(LedgerError::CoverageInvalid(format!(
                        "player {} is not covered by payment {}",
                        player_id, self.payment_id
                    )));
                }
            }
        }

        let order_id = original.order_id.clone();
        let mut parts = Vec::with_capacity(self.specs.len());
        for spec in &self.specs {
            let mut player_ids: Vec<String> = Vec::with_capacity(spec.player_ids.len());
            for id in &spec.player_ids {
                if !player_ids.contains(id) {
                    player_ids.push(id.clone());
                }
            }
            let part = Payment {
                id: uuid::Uuid::new_v4().to_string(),
                order_id: order_id.clone(),
                payer: spec.payer.clone().unwrap_or_else(|| original.payer.clone()),
                amount: spec.amount,
                method: original.method.clone(),
                status: original.status,
                player_ids,
                // The parts evidence the same money movement, so each keeps
                // the original attachments
                proof_refs: original.proof_refs.clone(),
                note: spec.note.clone(),
                cancel_reason: None,
                created_at: ctx.now(),
                confirmed_at: original.confirmed_at,
            };
            ctx.store_payment(&part)?;
            parts.push(part);
        }

        ctx.remove_payment(&order_id, &original.id)?;

        tracing::info!(
            order_id = %order_id,
            payment_id = %self.payment_id,
            parts = parts.len(),
            "payment split"
        );

        Ok(ActionEffect::new(parts, order_id).with_warning(warning))
    }
}
