//! Ledger command context and error types

use super::storage::{LedgerStorage, StorageError};
use redb::WriteTransaction;
use shared::error::{AppError, ErrorCode};
use shared::order::{Order, Payment, Player};
use thiserror::Error;

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order does not use the multi-payment ledger: {0}")]
    OrderNotMultiPayment(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Payment not found: {0}")]
    PaymentNotFound(String),

    #[error("Payment is not pending: {0}")]
    PaymentNotPending(String),

    #[error("Payment already confirmed: {0}")]
    AlreadyConfirmed(String),

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Invalid payment coverage: {0}")]
    CoverageInvalid(String),

    #[error("Merge requires at least one payment")]
    MergeEmpty,

    #[error("Cannot merge payments with mixed statuses")]
    MergeStatusMixed,

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::OrderNotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, format!("Order not found: {id}"))
            }
            LedgerError::OrderNotMultiPayment(id) => AppError::with_message(
                ErrorCode::OrderNotMultiPayment,
                format!("Order does not use the multi-payment ledger: {id}"),
            ),
            LedgerError::PlayerNotFound(id) => {
                AppError::with_message(ErrorCode::PlayerNotFound, format!("Player not found: {id}"))
            }
            LedgerError::PaymentNotFound(id) => AppError::with_message(
                ErrorCode::PaymentNotFound,
                format!("Payment not found: {id}"),
            ),
            LedgerError::PaymentNotPending(id) => AppError::with_message(
                ErrorCode::PaymentNotPending,
                format!("Payment is not pending: {id}"),
            ),
            LedgerError::AlreadyConfirmed(id) => AppError::with_message(
                ErrorCode::PaymentAlreadyConfirmed,
                format!("Payment already confirmed: {id}"),
            ),
            LedgerError::InvalidAmount => AppError::new(ErrorCode::PaymentInvalidAmount),
            LedgerError::CoverageInvalid(msg) => {
                AppError::with_message(ErrorCode::PaymentCoverageInvalid, msg)
            }
            LedgerError::MergeEmpty => AppError::new(ErrorCode::PaymentMergeEmpty),
            LedgerError::MergeStatusMixed => AppError::new(ErrorCode::PaymentStatusMixed),
            LedgerError::InvalidOperation(msg) => AppError::validation(msg),
            LedgerError::Validation(msg) => AppError::validation(msg),
            LedgerError::Storage(e) => {
                tracing::error!(error = %e, "ledger storage error");
                AppError::database(e.to_string())
            }
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Result of a ledger action, before the manager's reconcile pass
pub struct ActionEffect<T> {
    pub output: T,
    /// Order whose players/summary must be reconciled in the same
    /// transaction (None when the order itself was deleted)
    pub touched_order: Option<String>,
    /// Soft reconciliation warnings (never failures)
    pub warnings: Vec<String>,
}

impl<T> ActionEffect<T> {
    pub fn new(output: T, touched_order: impl Into<String>) -> Self {
        Self {
            output,
            touched_order: Some(touched_order.into()),
            warnings: Vec::new(),
        }
    }

    pub fn detached(output: T) -> Self {
        Self {
            output,
            touched_order: None,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: Option<String>) -> Self {
        if let Some(w) = warning {
            self.warnings.push(w);
        }
        self
    }
}

/// Command context wrapping one write transaction
///
/// All reads inside the context observe the transaction's pending writes,
/// so status recomputation always sees the mutation it follows.
pub struct LedgerContext<'a> {
    storage: &'a LedgerStorage,
    txn: &'a WriteTransaction,
    now: i64,
}

impl<'a> LedgerContext<'a> {
    pub fn new(storage: &'a LedgerStorage, txn: &'a WriteTransaction) -> Self {
        Self {
            storage,
            txn,
            now: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Timestamp fixed at context creation, shared by every write in the
    /// transaction
    pub fn now(&self) -> i64 {
        self.now
    }

    pub fn require_order(&self, order_id: &str) -> LedgerResult<Order> {
        self.storage
            .get_order_txn(self.txn, order_id)?
            .ok_or_else(|| LedgerError::OrderNotFound(order_id.to_string()))
    }

    /// Load an order and verify it carries a ledger
    pub fn require_ledger_order(&self, order_id: &str) -> LedgerResult<Order> {
        let order = self.require_order(order_id)?;
        if !order.enable_multi_payment {
            return Err(LedgerError::OrderNotMultiPayment(order_id.to_string()));
        }
        Ok(order)
    }

    pub fn require_payment(&self, payment_id: &str) -> LedgerResult<Payment> {
        let order_id = self
            .storage
            .find_order_for_payment_txn(self.txn, payment_id)?
            .ok_or_else(|| LedgerError::PaymentNotFound(payment_id.to_string()))?;
        self.storage
            .get_payment_txn(self.txn, &order_id, payment_id)?
            .ok_or_else(|| LedgerError::PaymentNotFound(payment_id.to_string()))
    }

    pub fn get_players(&self, order_id: &str) -> LedgerResult<Vec<Player>> {
        Ok(self.storage.get_players_for_order_txn(self.txn, order_id)?)
    }

    pub fn get_player(&self, order_id: &str, player_id: &str) -> LedgerResult<Option<Player>> {
        Ok(self.storage.get_player_txn(self.txn, order_id, player_id)?)
    }

    pub fn get_payments(&self, order_id: &str) -> LedgerResult<Vec<Payment>> {
        Ok(self.storage.get_payments_for_order_txn(self.txn, order_id)?)
    }

    pub fn store_order(&self, order: &Order) -> LedgerResult<()> {
        Ok(self.storage.store_order(self.txn, order)?)
    }

    pub fn store_player(&self, player: &Player) -> LedgerResult<()> {
        Ok(self.storage.store_player(self.txn, player)?)
    }

    pub fn store_payment(&self, payment: &Payment) -> LedgerResult<()> {
        Ok(self.storage.store_payment(self.txn, payment)?)
    }

    pub fn remove_payment(&self, order_id: &str, payment_id: &str) -> LedgerResult<()> {
        Ok(self.storage.remove_payment(self.txn, order_id, payment_id)?)
    }

    pub fn remove_order_cascade(&self, order_id: &str) -> LedgerResult<()> {
        self.storage.remove_payments_for_order(self.txn, order_id)?;
        self.storage.remove_players_for_order(self.txn, order_id)?;
        self.storage.remove_order(self.txn, order_id)?;
        Ok(())
    }

    /// Verify every id refers to a player of the order; returns the ids
    /// deduplicated, preserving first-seen order
    pub fn require_players_exist(
        &self,
        order_id: &str,
        player_ids: &[String],
    ) -> LedgerResult<Vec<String>> {
        let mut seen = Vec::with_capacity(player_ids.len());
        for id in player_ids {
            if seen.iter().any(|s| s == id) {
                continue;
            }
            if self.get_player(order_id, id)?.is_none() {
                return Err(LedgerError::CoverageInvalid(format!(
                    "player {} does not belong to order {}",
                    id, order_id
                )));
            }
            seen.push(id.clone());
        }
        Ok(seen)
    }
}

/// A ledger mutation, executed by the manager inside one write transaction
pub trait LedgerAction {
    type Output;

    fn execute(&self, ctx: &mut LedgerContext<'_>) -> LedgerResult<ActionEffect<Self::Output>>;
}
