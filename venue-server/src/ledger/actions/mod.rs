//! Ledger actions
//!
//! One file per mutation. Each action validates its input against the
//! transaction's pending state and applies its writes; the manager follows
//! with the reconcile pass and commits. Any error aborts the whole
//! transaction.

pub mod cancel_payment;
pub mod confirm_payment;
pub mod create_order;
pub mod create_payment;
pub mod delete_order;
pub mod delete_payment;
pub mod merge_payments;
pub mod split_payment;
pub mod update_payment;

pub use cancel_payment::{CancelPaymentAction, FailPaymentAction};
pub use confirm_payment::ConfirmPaymentAction;
pub use create_order::CreateOrderAction;
pub use create_payment::CreatePaymentAction;
pub use delete_order::DeleteOrderAction;
pub use delete_payment::DeletePaymentAction;
pub use merge_payments::MergePaymentsAction;
pub use split_payment::SplitPaymentAction;
pub use update_payment::UpdatePaymentAction;
