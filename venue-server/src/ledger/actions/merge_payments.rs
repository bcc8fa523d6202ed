//! MergePayments action
//!
//! Collapses several payments into one: summed amount, unioned covered
//! players, deduplicated unioned proof attachments. The originals are
//! deleted; the merged payment's note records their ids as an audit
//! breadcrumb.

use crate::ledger::context::{ActionEffect, LedgerAction, LedgerContext, LedgerError, LedgerResult};
use crate::ledger::money::{to_decimal, to_f64};
use rust_decimal::Decimal;
use shared::order::{MergeTarget, Payment, PaymentStatus};

pub struct MergePaymentsAction {
    pub order_id: String,
    pub payment_ids: Vec<String>,
    pub target: MergeTarget,
}

impl LedgerAction for MergePaymentsAction {
    type Output = Payment;

    fn execute(&self, ctx: &mut LedgerContext<'_>) -> LedgerResult<ActionEffect<Payment>> {
        if self.payment_ids.is_empty() {
            return Err(LedgerError::MergeEmpty);
        }

        ctx.require_ledger_order(&self.order_id)?;

        let mut inputs: Vec<Payment> = Vec::with_capacity(self.payment_ids.len());
        for id in &self.payment_ids {
            let payment = ctx.require_payment(id)?;
            if payment.order_id != self.order_id {
                return Err(LedgerError::InvalidOperation(format!(
                    "payment {} belongs to another order",
                    id
                )));
            }
            if inputs.iter().any(|p| p.id == payment.id) {
                return Err(LedgerError::InvalidOperation(format!(
                    "payment {} listed twice",
                    id
                )));
            }
            inputs.push(payment);
        }

        // Only live payments merge, and only with their own kind: a pending
        // merge stays editable, a confirmed merge keeps counting toward the
        // covered players.
        let status = inputs[0].status;
        if status != PaymentStatus::Pending && status != PaymentStatus::Confirmed {
            return Err(LedgerError::PaymentNotPending(inputs[0].id.clone()));
        }
        if inputs.iter().any(|p| p.status != status) {
            return Err(LedgerError::MergeStatusMixed);
        }

        let amount: Decimal = inputs.iter().map(|p| to_decimal(p.amount)).sum();

        let mut player_ids: Vec<String> = Vec::new();
        let mut proof_refs: Vec<String> = Vec::new();
        for payment in &inputs {
            for id in &payment.player_ids {
                if !player_ids.contains(id) {
                    player_ids.push(id.clone());
                }
            }
            for proof in &payment.proof_refs {
                if !proof_refs.contains(proof) {
                    proof_refs.push(proof.clone());
                }
            }
        }

        let merged_ids: Vec<&str> = inputs.iter().map(|p| p.id.as_str()).collect();
        let note = self
            .target
            .note
            .clone()
            .unwrap_or_else(|| format!("merged from: {}", merged_ids.join(", ")));

        let merged = Payment {
            id: uuid::Uuid::new_v4().to_string(),
            order_id: self.order_id.clone(),
            payer: self
                .target
                .payer
                .clone()
                .unwrap_or_else(|| inputs[0].payer.clone()),
            amount: to_f64(amount),
            method: self
                .target
                .method
                .clone()
                .unwrap_or_else(|| inputs[0].method.clone()),
            status,
            player_ids,
            proof_refs,
            note: Some(note),
            cancel_reason: None,
            created_at: ctx.now(),
            confirmed_at: inputs.iter().filter_map(|p| p.confirmed_at).max(),
        };

        for payment in &inputs {
            ctx.remove_payment(&self.order_id, &payment.id)?;
        }
        ctx.store_payment(&merged)?;

        tracing::info!(
            order_id = %self.order_id,
            merged_id = %merged.id,
            inputs = inputs.len(),
            amount = merged.amount,
            "payments merged"
        );

        Ok(ActionEffect::new(merged, self.order_id.clone()))
    }
}
