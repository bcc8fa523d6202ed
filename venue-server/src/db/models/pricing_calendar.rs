//! Pricing Calendar Entry Model (日历折扣)

use super::serde_thing;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::order::{CalendarDiscountKind, CalendarKind};
use surrealdb::sql::Thing;
use validator::Validate;

/// Date-scoped discount rule
///
/// At most one company-wide entry may exist per (company, date); store-scoped
/// entries may layer on top. When several entries apply to the same booking,
/// they stack sequentially in ascending [`CalendarKind`] priority order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingCalendarEntry {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<Thing>,
    pub company_id: String,
    /// Store scope: empty/None = company-wide
    #[serde(default)]
    pub store_ids: Option<Vec<String>>,
    pub date: NaiveDate,
    pub calendar_kind: CalendarKind,
    pub discount_kind: CalendarDiscountKind,
    /// Percentage (10 = 10%) or fixed amount
    pub discount_value: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create pricing calendar entry payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PricingCalendarEntryCreate {
    pub company_id: String,
    #[serde(default)]
    pub store_ids: Option<Vec<String>>,
    pub date: NaiveDate,
    pub calendar_kind: CalendarKind,
    pub discount_kind: CalendarDiscountKind,
    #[validate(range(min = 0.0))]
    pub discount_value: f64,
}

/// Update pricing calendar entry payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PricingCalendarEntryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_kind: Option<CalendarKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_kind: Option<CalendarDiscountKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_round_trip() {
        let entry = PricingCalendarEntry {
            id: None,
            company_id: "c1".into(),
            store_ids: Some(vec!["s1".into()]),
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            calendar_kind: CalendarKind::Holiday,
            discount_kind: CalendarDiscountKind::Percentage,
            discount_value: 10.0,
            is_active: true,
            created_at: 0,
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: PricingCalendarEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.date, entry.date);
        assert_eq!(back.calendar_kind, CalendarKind::Holiday);
    }
}
