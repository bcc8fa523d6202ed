//! Discount Rule Matcher
//!
//! Scope and validity matching, applied identically to role pricing
//! templates and pricing calendar entries.

use crate::db::models::{PricingCalendarEntry, RolePricingTemplate};
use chrono::NaiveDate;

/// Check whether a store-scope list covers a store
///
/// An empty or missing list means company-wide (matches every store of the
/// owning company); otherwise the store must be listed.
pub fn matches_store_scope(store_ids: Option<&[String]>, store_id: &str) -> bool {
    match store_ids {
        None => true,
        Some(ids) if ids.is_empty() => true,
        Some(ids) => ids.iter().any(|id| id == store_id),
    }
}

/// Check a validity window, treating a missing bound as unbounded
pub fn is_within_validity(
    valid_from: Option<NaiveDate>,
    valid_to: Option<NaiveDate>,
    as_of: NaiveDate,
) -> bool {
    if let Some(from) = valid_from
        && as_of < from
    {
        return false;
    }
    if let Some(to) = valid_to
        && as_of > to
    {
        return false;
    }
    true
}

/// Check whether a role template applies to a store on a date
pub fn template_applies(tpl: &RolePricingTemplate, store_id: &str, as_of: NaiveDate) -> bool {
    tpl.is_active
        && matches_store_scope(tpl.store_ids.as_deref(), store_id)
        && is_within_validity(tpl.valid_from, tpl.valid_to, as_of)
}

/// Check whether a calendar entry applies to a store on a date
pub fn calendar_entry_applies(
    entry: &PricingCalendarEntry,
    store_id: &str,
    date: NaiveDate,
) -> bool {
    entry.is_active && entry.date == date && matches_store_scope(entry.store_ids.as_deref(), store_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{CalendarDiscountKind, CalendarKind, DiscountKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_template(store_ids: Option<Vec<String>>) -> RolePricingTemplate {
        RolePricingTemplate {
            id: None,
            company_id: "c1".into(),
            store_ids,
            role_name: "Student".into(),
            discount_kind: DiscountKind::Percentage,
            discount_value: 50.0,
            valid_from: None,
            valid_to: None,
            is_active: true,
            created_by: None,
            created_at: 0,
        }
    }

    #[test]
    fn test_company_wide_scope_matches_all_stores() {
        assert!(matches_store_scope(None, "s1"));
        assert!(matches_store_scope(Some(&[]), "s1"));
    }

    #[test]
    fn test_store_specific_scope() {
        let ids = vec!["s1".to_string(), "s2".to_string()];
        assert!(matches_store_scope(Some(&ids), "s1"));
        assert!(!matches_store_scope(Some(&ids), "s3"));
    }

    #[test]
    fn test_validity_missing_bounds_are_unbounded() {
        let d = date(2025, 6, 1);
        assert!(is_within_validity(None, None, d));
        assert!(is_within_validity(Some(date(2025, 1, 1)), None, d));
        assert!(is_within_validity(None, Some(date(2025, 12, 31)), d));
    }

    #[test]
    fn test_validity_bounds_inclusive() {
        let from = date(2025, 1, 1);
        let to = date(2025, 1, 31);
        assert!(is_within_validity(Some(from), Some(to), from));
        assert!(is_within_validity(Some(from), Some(to), to));
        assert!(!is_within_validity(Some(from), Some(to), date(2024, 12, 31)));
        assert!(!is_within_validity(Some(from), Some(to), date(2025, 2, 1)));
    }

    #[test]
    fn test_inactive_template_never_applies() {
        let mut tpl = make_template(None);
        tpl.is_active = false;
        assert!(!template_applies(&tpl, "s1", date(2025, 6, 1)));
    }

    #[test]
    fn test_template_expired_window() {
        let mut tpl = make_template(None);
        tpl.valid_to = Some(date(2025, 3, 31));
        assert!(template_applies(&tpl, "s1", date(2025, 3, 31)));
        assert!(!template_applies(&tpl, "s1", date(2025, 4, 1)));
    }

    #[test]
    fn test_calendar_entry_date_must_match() {
        let entry = PricingCalendarEntry {
            id: None,
            company_id: "c1".into(),
            store_ids: None,
            date: date(2025, 1, 1),
            calendar_kind: CalendarKind::Holiday,
            discount_kind: CalendarDiscountKind::Percentage,
            discount_value: 10.0,
            is_active: true,
            created_at: 0,
        };
        assert!(calendar_entry_applies(&entry, "s1", date(2025, 1, 1)));
        assert!(!calendar_entry_applies(&entry, "s1", date(2025, 1, 2)));
    }
}
