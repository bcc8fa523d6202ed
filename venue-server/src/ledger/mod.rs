//! Payment Ledger
//!
//! The stateful core of the backend: Player records (one per seat, each with
//! a final amount owed and a payment status) and Payment records (one per
//! money movement, each covering a subset of players).
//!
//! # Architecture
//!
//! ```text
//! API handler → LedgerManager → Action (validate + mutate)
//!                    │
//!                    ├─ refresh: player statuses + order summary
//!                    └─ commit (single redb write transaction)
//! ```
//!
//! Every mutation runs inside exactly one write transaction: payment state,
//! recomputed player statuses and the refreshed order summary commit
//! together or not at all. Player statuses are always recomputed from a
//! fresh read of all covering payments inside the transaction, never by
//! incrementing a cached counter, so concurrent confirmations of different
//! payments on the same order cannot corrupt shared aggregates.

pub mod actions;
pub mod context;
pub mod manager;
pub mod money;
pub mod reconcile;
pub mod storage;

pub use context::{LedgerContext, LedgerError, LedgerResult};
pub use manager::LedgerManager;
pub use storage::LedgerStorage;
