//! LedgerManager - ledger command processing
//!
//! Every mutation follows the same shape:
//!
//! ```text
//! run(action)
//!     ├─ 1. Begin write transaction
//!     ├─ 2. Action validates and applies its writes
//!     ├─ 3. Reconcile pass: recompute player statuses + order summary
//!     ├─ 4. Commit (any earlier error aborts the whole transaction)
//!     └─ 5. Surface soft warnings
//! ```
//!
//! The read path (`get_order_summary`, `get_order_detail`) never trusts the
//! cached summary block for multi-payment orders: it re-derives from the
//! live Player/Payment tables, and synthesizes uniform player figures for
//! single-payment orders.

use super::actions::{
    CancelPaymentAction, ConfirmPaymentAction, CreateOrderAction, CreatePaymentAction,
    DeleteOrderAction, DeletePaymentAction, FailPaymentAction, MergePaymentsAction,
    SplitPaymentAction, UpdatePaymentAction,
};
use super::context::{LedgerAction, LedgerContext, LedgerError, LedgerResult};
use super::reconcile;
use super::storage::LedgerStorage;
use serde::Serialize;
use shared::order::{
    MergeTarget, Order, OrderDraft, OrderSummary, Payment, PaymentChanges, PaymentDraft,
    PaymentItem, Player, SplitSpec,
};
use std::path::Path;

/// Result of a ledger mutation: the value plus any soft warnings
#[derive(Debug, Clone, Serialize)]
pub struct LedgerOutcome<T> {
    pub value: T,
    pub warnings: Vec<String>,
}

/// Full order view shared by both reconciliation paths
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    pub order: Order,
    /// Real ledger players, or uniform synthesized seats for
    /// single-payment orders (see `summary.synthesized`)
    pub players: Vec<Player>,
    pub payments: Vec<Payment>,
    pub summary: OrderSummary,
}

/// Payment ledger manager
#[derive(Clone)]
pub struct LedgerManager {
    storage: LedgerStorage,
}

impl std::fmt::Debug for LedgerManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerManager").finish()
    }
}

impl LedgerManager {
    /// Open the ledger database at the given path
    pub fn new(db_path: impl AsRef<Path>) -> LedgerResult<Self> {
        let storage = LedgerStorage::open(db_path)?;
        Ok(Self { storage })
    }

    /// Create a manager over existing storage
    pub fn with_storage(storage: LedgerStorage) -> Self {
        Self { storage }
    }

    /// Execute one action inside a single write transaction
    fn run<A: LedgerAction>(&self, action: A) -> LedgerResult<LedgerOutcome<A::Output>> {
        let txn = self.storage.begin_write()?;
        let effect = {
            let mut ctx = LedgerContext::new(&self.storage, &txn);
            let effect = action.execute(&mut ctx)?;
            if let Some(order_id) = &effect.touched_order {
                reconcile::refresh_order(&ctx, order_id)?;
            }
            effect
        };
        txn.commit().map_err(super::storage::StorageError::from)?;

        for warning in &effect.warnings {
            tracing::warn!(target: "ledger", warning = %warning, "reconciliation warning");
        }
        Ok(LedgerOutcome {
            value: effect.output,
            warnings: effect.warnings,
        })
    }

    // ========== Mutations ==========

    pub fn create_order(
        &self,
        draft: OrderDraft,
        items: Vec<PaymentItem>,
    ) -> LedgerResult<LedgerOutcome<Order>> {
        self.run(CreateOrderAction { draft, items })
    }

    pub fn delete_order(&self, order_id: &str) -> LedgerResult<LedgerOutcome<()>> {
        self.run(DeleteOrderAction { order_id: order_id.to_string() })
    }

    pub fn create_payment(
        &self,
        order_id: &str,
        draft: PaymentDraft,
    ) -> LedgerResult<LedgerOutcome<Payment>> {
        self.run(CreatePaymentAction { order_id: order_id.to_string(), draft })
    }

    pub fn update_payment(
        &self,
        payment_id: &str,
        changes: PaymentChanges,
    ) -> LedgerResult<LedgerOutcome<Payment>> {
        self.run(UpdatePaymentAction { payment_id: payment_id.to_string(), changes })
    }

    pub fn confirm_payment(&self, payment_id: &str) -> LedgerResult<LedgerOutcome<Payment>> {
        self.run(ConfirmPaymentAction { payment_id: payment_id.to_string() })
    }

    pub fn cancel_payment(
        &self,
        payment_id: &str,
        reason: Option<String>,
    ) -> LedgerResult<LedgerOutcome<Payment>> {
        self.run(CancelPaymentAction { payment_id: payment_id.to_string(), reason })
    }

    pub fn fail_payment(
        &self,
        payment_id: &str,
        reason: Option<String>,
    ) -> LedgerResult<LedgerOutcome<Payment>> {
        self.run(FailPaymentAction { payment_id: payment_id.to_string(), reason })
    }

    pub fn merge_payments(
        &self,
        order_id: &str,
        payment_ids: Vec<String>,
        target: MergeTarget,
    ) -> LedgerResult<LedgerOutcome<Payment>> {
        self.run(MergePaymentsAction { order_id: order_id.to_string(), payment_ids, target })
    }

    pub fn split_payment(
        &self,
        payment_id: &str,
        specs: Vec<SplitSpec>,
    ) -> LedgerResult<LedgerOutcome<Vec<Payment>>> {
        self.run(SplitPaymentAction { payment_id: payment_id.to_string(), specs })
    }

    pub fn delete_payment(&self, payment_id: &str) -> LedgerResult<LedgerOutcome<Payment>> {
        self.run(DeletePaymentAction { payment_id: payment_id.to_string() })
    }

    // ========== Read paths ==========

    pub fn get_order(&self, order_id: &str) -> LedgerResult<Order> {
        self.storage
            .get_order(order_id)?
            .ok_or_else(|| LedgerError::OrderNotFound(order_id.to_string()))
    }

    pub fn list_orders(&self) -> LedgerResult<Vec<Order>> {
        Ok(self.storage.list_orders()?)
    }

    pub fn get_players(&self, order_id: &str) -> LedgerResult<Vec<Player>> {
        Ok(self.storage.get_players_for_order(order_id)?)
    }

    pub fn get_payments(&self, order_id: &str) -> LedgerResult<Vec<Payment>> {
        Ok(self.storage.get_payments_for_order(order_id)?)
    }

    pub fn get_payment(&self, payment_id: &str) -> LedgerResult<Payment> {
        let order_id = self
            .storage
            .find_order_for_payment(payment_id)?
            .ok_or_else(|| LedgerError::PaymentNotFound(payment_id.to_string()))?;
        self.storage
            .get_payments_for_order(&order_id)?
            .into_iter()
            .find(|p| p.id == payment_id)
            .ok_or_else(|| LedgerError::PaymentNotFound(payment_id.to_string()))
    }

    /// Order summary, derived fresh for whichever reconciliation path the
    /// order uses
    pub fn get_order_summary(&self, order_id: &str) -> LedgerResult<OrderSummary> {
        let order = self.get_order(order_id)?;
        if order.enable_multi_payment {
            let players = self.get_players(order_id)?;
            let payments = self.get_payments(order_id)?;
            Ok(reconcile::summarize_ledger(&players, &payments))
        } else {
            Ok(reconcile::synthesize_header_summary(&order))
        }
    }

    /// Full order view; single-payment orders get synthesized seats
    pub fn get_order_detail(&self, order_id: &str) -> LedgerResult<OrderDetail> {
        let order = self.get_order(order_id)?;
        if order.enable_multi_payment {
            let players = self.get_players(order_id)?;
            let payments = self.get_payments(order_id)?;
            let summary = reconcile::summarize_ledger(&players, &payments);
            Ok(OrderDetail { order, players, payments, summary })
        } else {
            let players = reconcile::synthesize_players(&order);
            let summary = reconcile::synthesize_header_summary(&order);
            Ok(OrderDetail { order, players, payments: Vec::new(), summary })
        }
    }
}

#[cfg(test)]
mod tests;
