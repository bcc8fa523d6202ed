//! Order / ledger domain types
//!
//! Records exchanged between the pricing engine, the payment ledger and the
//! HTTP layer:
//!
//! - **types**: enums and request payloads (discount kinds, statuses, drafts)
//! - **discount**: discount provenance snapshots and decomposition items
//! - **player**: one seat's worth of an order (价格分解后的单个座位)
//! - **payment**: one money movement covering a subset of players
//! - **record**: the order header with its denormalized summary cache
//! - **summary**: the reconciliation summary shared by both read paths

pub mod discount;
pub mod payment;
pub mod player;
pub mod record;
pub mod summary;
pub mod types;

pub use discount::{AppliedDiscount, DiscountOutcome, DiscountSource, PaymentItem, TemplateSnapshot};
pub use payment::Payment;
pub use player::Player;
pub use record::Order;
pub use summary::OrderSummary;
pub use types::{
    CalendarDiscountKind, CalendarKind, CustomerInfo, DiscountKind, HeaderPaymentStatus,
    MergeTarget, OrderDraft, PayerInfo, PaymentChanges, PaymentDraft, PaymentStatus,
    PlayerPaymentStatus, RoleSelection, SplitSpec,
};
