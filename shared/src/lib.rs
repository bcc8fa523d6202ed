//! Shared types for the venue booking backend
//!
//! Common types used across crates: the unified error system, the API
//! response envelope, and the order/ledger domain records exchanged between
//! the pricing engine, the payment ledger and the HTTP layer.

pub mod error;
pub mod order;
pub mod response;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
