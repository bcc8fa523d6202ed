//! Discount Calculator
//!
//! Discount arithmetic using rust_decimal for precision, stored as f64.
//! Each step rounds to 2 decimal places; aggregates are always sums of
//! already-rounded values, never re-derived from an unrounded total.

use crate::db::models::PricingCalendarEntry;
use rust_decimal::prelude::*;
use shared::order::{
    AppliedDiscount, DiscountKind, DiscountOutcome, DiscountSource, TemplateSnapshot,
};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Compute the discount a single rule takes off an amount
///
/// - percentage: `amount * value / 100`
/// - fixed: `min(value, amount)` (never drives the amount negative)
/// - free: the full amount
pub fn discount_for(kind: DiscountKind, value: f64, amount: Decimal) -> Decimal {
    if amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let value = to_decimal(value);
    let raw = match kind {
        DiscountKind::Percentage => amount * value / Decimal::ONE_HUNDRED,
        DiscountKind::Fixed => value.min(amount),
        DiscountKind::Free => amount,
    };
    raw.max(Decimal::ZERO)
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Apply a role template snapshot to an amount
pub fn apply_template(amount: f64, snapshot: &TemplateSnapshot) -> DiscountOutcome {
    let base = to_decimal(amount);
    let discount = discount_for(snapshot.discount_kind, snapshot.discount_value, base);
    DiscountOutcome {
        original_amount: amount,
        discount_amount: to_f64(discount),
        discounted_amount: to_f64(base - discount),
        applied: vec![AppliedDiscount {
            source: DiscountSource::RoleTemplate,
            source_id: Some(snapshot.template_id.clone()),
            label: snapshot.role_name.clone(),
            discount_kind: snapshot.discount_kind,
            discount_value: snapshot.discount_value,
            calculated_amount: to_f64(discount),
        }],
        note: None,
    }
}

/// Apply a set of calendar entries to an amount
///
/// Entries stack multiplicatively in sequence: each discount applies to the
/// already-discounted running amount, in ascending calendar-kind priority
/// order (holiday, weekend, special, promotion). The ordering is a
/// deliberate tie-break, with `created_at` ordering entries of the same kind.
pub fn apply_calendar_entries(amount: f64, entries: &[PricingCalendarEntry]) -> DiscountOutcome {
    if entries.is_empty() {
        return DiscountOutcome::none(amount, "no calendar entry for this date");
    }

    let mut ordered: Vec<&PricingCalendarEntry> = entries.iter().collect();
    ordered.sort_by_key(|e| (e.calendar_kind.priority(), e.created_at));

    let mut running = to_decimal(amount);
    let mut applied = Vec::with_capacity(ordered.len());

    for entry in ordered {
        let kind: DiscountKind = entry.discount_kind.into();
        let discount = discount_for(kind, entry.discount_value, running);
        if discount <= Decimal::ZERO {
            continue;
        }
        running -= discount;
        applied.push(AppliedDiscount {
            source: DiscountSource::Calendar,
            source_id: entry.id.as_ref().map(|t| t.to_string()),
            label: entry.calendar_kind.name().to_string(),
            discount_kind: kind,
            discount_value: entry.discount_value,
            calculated_amount: to_f64(discount),
        });
    }

    if applied.is_empty() {
        return DiscountOutcome::none(amount, "no applicable calendar discount");
    }

    let discounted = to_f64(running);
    DiscountOutcome {
        original_amount: amount,
        discount_amount: to_f64(to_decimal(amount) - running),
        discounted_amount: discounted,
        applied,
        note: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::order::{CalendarDiscountKind, CalendarKind};

    fn entry(
        kind: CalendarKind,
        discount_kind: CalendarDiscountKind,
        value: f64,
    ) -> PricingCalendarEntry {
        PricingCalendarEntry {
            id: None,
            company_id: "c1".into(),
            store_ids: None,
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            calendar_kind: kind,
            discount_kind,
            discount_value: value,
            is_active: true,
            created_at: 0,
        }
    }

    fn snapshot(kind: DiscountKind, value: f64) -> TemplateSnapshot {
        TemplateSnapshot {
            template_id: "tpl-1".into(),
            role_name: "Student".into(),
            discount_kind: kind,
            discount_value: value,
        }
    }

    #[test]
    fn test_percentage_discount() {
        let outcome = apply_template(100_000.0, &snapshot(DiscountKind::Percentage, 50.0));
        assert_eq!(outcome.discount_amount, 50_000.0);
        assert_eq!(outcome.discounted_amount, 50_000.0);
        assert_eq!(outcome.applied.len(), 1);
        assert_eq!(outcome.applied[0].label, "Student");
    }

    #[test]
    fn test_fixed_discount_clamps_to_amount() {
        let outcome = apply_template(30_000.0, &snapshot(DiscountKind::Fixed, 50_000.0));
        assert_eq!(outcome.discount_amount, 30_000.0);
        assert_eq!(outcome.discounted_amount, 0.0);
    }

    #[test]
    fn test_free_discount_takes_full_amount() {
        let outcome = apply_template(45_000.0, &snapshot(DiscountKind::Free, 0.0));
        assert_eq!(outcome.discount_amount, 45_000.0);
        assert_eq!(outcome.discounted_amount, 0.0);
    }

    #[test]
    fn test_discount_never_negative() {
        let d = discount_for(DiscountKind::Fixed, 10.0, to_decimal(-5.0));
        assert_eq!(d, Decimal::ZERO);
    }

    #[test]
    fn test_calendar_stacking_order() {
        // Holiday 10% then store-specific special fixed 5,000:
        // 100,000 -> 90,000 -> 85,000
        let entries = vec![
            entry(CalendarKind::Special, CalendarDiscountKind::Fixed, 5_000.0),
            entry(CalendarKind::Holiday, CalendarDiscountKind::Percentage, 10.0),
        ];
        let outcome = apply_calendar_entries(100_000.0, &entries);
        assert_eq!(outcome.discounted_amount, 85_000.0);
        assert_eq!(outcome.discount_amount, 15_000.0);
        // Holiday applied first despite being listed second
        assert_eq!(outcome.applied[0].label, "holiday");
        assert_eq!(outcome.applied[0].calculated_amount, 10_000.0);
        assert_eq!(outcome.applied[1].label, "special");
        assert_eq!(outcome.applied[1].calculated_amount, 5_000.0);
    }

    #[test]
    fn test_calendar_percentage_applies_to_running_amount() {
        // 10% then 10% stacks multiplicatively: 100 -> 90 -> 81
        let entries = vec![
            entry(CalendarKind::Holiday, CalendarDiscountKind::Percentage, 10.0),
            entry(CalendarKind::Weekend, CalendarDiscountKind::Percentage, 10.0),
        ];
        let outcome = apply_calendar_entries(100.0, &entries);
        assert_eq!(outcome.discounted_amount, 81.0);
    }

    #[test]
    fn test_calendar_no_entries_degrades() {
        let outcome = apply_calendar_entries(100.0, &[]);
        assert_eq!(outcome.discounted_amount, 100.0);
        assert!(outcome.note.is_some());
        assert!(outcome.applied.is_empty());
    }

    #[test]
    fn test_fixed_larger_than_running_clamps() {
        // Second entry cannot push the amount below zero
        let entries = vec![
            entry(CalendarKind::Holiday, CalendarDiscountKind::Fixed, 80.0),
            entry(CalendarKind::Special, CalendarDiscountKind::Fixed, 50.0),
        ];
        let outcome = apply_calendar_entries(100.0, &entries);
        assert_eq!(outcome.discounted_amount, 0.0);
        assert_eq!(outcome.discount_amount, 100.0);
        assert_eq!(outcome.applied[1].calculated_amount, 20.0);
    }

    #[test]
    fn test_rounding_is_per_step() {
        // 100 * 3.333% = 3.333 -> rounds to 3.33 at the step, not after summing
        let entries = vec![entry(CalendarKind::Holiday, CalendarDiscountKind::Percentage, 3.333)];
        let outcome = apply_calendar_entries(100.0, &entries);
        assert_eq!(outcome.applied[0].calculated_amount, 3.33);
        assert_eq!(outcome.discounted_amount, 96.67);
        assert_eq!(outcome.discount_amount, 3.33);
    }
}
