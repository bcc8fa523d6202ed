//! Pricing Engine
//!
//! 折扣解析与价格分解：
//!
//! - **matcher**: scope and validity matching for both discount catalogs
//! - **calculator**: discount arithmetic (rust_decimal, per-step rounding)
//! - **resolver**: repository-backed discount resolution with provenance
//! - **decompose**: splits an order into one payment item per seat
//!
//! Discount resolution never fails an order: unknown or inapplicable rules
//! degrade to "no discount applied" with a provenance note.

pub mod calculator;
pub mod decompose;
pub mod matcher;
pub mod resolver;

pub use decompose::PriceDecomposer;
pub use resolver::DiscountResolver;
