//! Database Models
//!
//! SurrealDB-backed catalog models. The discount catalogs are pure lookup
//! tables; all behavior lives in the pricing engine.

pub mod pricing_calendar;
pub mod role_pricing_template;
pub mod serde_thing;

pub use pricing_calendar::{PricingCalendarEntry, PricingCalendarEntryCreate, PricingCalendarEntryUpdate};
pub use role_pricing_template::{
    RolePricingTemplate, RolePricingTemplateCreate, RolePricingTemplateUpdate,
};
