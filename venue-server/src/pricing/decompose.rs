//! Price Decomposition Engine
//!
//! Partitions an order (unit price × player count, plus role selections and
//! the booking date's calendar discounts) into one payment item per seat.
//! The "one seat, one item" granularity is what lets the payment ledger
//! cover any subset of seats with any combination of payers.

use super::calculator::{discount_for, to_decimal, to_f64};
use super::resolver::DiscountResolver;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::order::{
    AppliedDiscount, DiscountOutcome, PaymentItem, RoleSelection, TemplateSnapshot,
    discount::selections_fit,
};

/// One role selection after its template has been resolved (or missed)
#[derive(Debug, Clone)]
pub struct ResolvedSelection {
    pub count: u32,
    pub template: Option<TemplateSnapshot>,
}

/// Build payment items from resolved inputs
///
/// Pure core of the engine: role selections are consumed first (one item per
/// seat, all seats of a selection priced identically), then the remaining
/// seats are emitted without a role discount. Every seat starts from the
/// calendar-discounted base; role discounts apply to that running amount.
/// Rounding is per item, so aggregates must sum the rounded items.
pub fn build_items(
    unit_price: f64,
    player_count: u32,
    seat_base: &DiscountOutcome,
    selections: &[ResolvedSelection],
) -> AppResult<Vec<PaymentItem>> {
    let assigned: u64 = selections.iter().map(|s| s.count as u64).sum();
    if assigned > player_count as u64 {
        return Err(AppError::with_message(
            ErrorCode::RoleSelectionExceedsSeats,
            format!(
                "role selections assign {} seats but the order has {}",
                assigned, player_count
            ),
        ));
    }

    if unit_price == 0.0 || player_count == 0 {
        return Ok(Vec::new());
    }

    let mut items = Vec::with_capacity(player_count as usize);
    let mut seq: u32 = 0;

    let emit = |seq: u32, template: Option<&TemplateSnapshot>| -> PaymentItem {
        let base_running = to_decimal(seat_base.discounted_amount);
        let mut applied: Vec<AppliedDiscount> = seat_base.applied.clone();
        let role_discount = match template {
            Some(snapshot) => {
                let d = discount_for(snapshot.discount_kind, snapshot.discount_value, base_running);
                if d > Decimal::ZERO {
                    applied.push(AppliedDiscount {
                        source: shared::order::DiscountSource::RoleTemplate,
                        source_id: Some(snapshot.template_id.clone()),
                        label: snapshot.role_name.clone(),
                        discount_kind: snapshot.discount_kind,
                        discount_value: snapshot.discount_value,
                        calculated_amount: to_f64(d),
                    });
                }
                d
            }
            None => Decimal::ZERO,
        };

        let final_amount = (base_running - role_discount).max(Decimal::ZERO);
        let discount_amount = (to_decimal(unit_price) - final_amount).max(Decimal::ZERO);

        PaymentItem {
            seq,
            original_amount: unit_price,
            discount_amount: to_f64(discount_amount),
            final_amount: to_f64(final_amount),
            template: template.cloned(),
            applied,
        }
    };

    for selection in selections {
        for _ in 0..selection.count {
            seq += 1;
            items.push(emit(seq, selection.template.as_ref()));
        }
    }

    while seq < player_count {
        seq += 1;
        items.push(emit(seq, None));
    }

    Ok(items)
}

/// Price decomposition service
///
/// Resolves each role selection once through the [`DiscountResolver`], then
/// runs the pure core. Exposed to the HTTP layer as the pre-booking price
/// preview and consumed by order creation to seed the ledger.
#[derive(Debug, Clone)]
pub struct PriceDecomposer {
    resolver: DiscountResolver,
}

impl PriceDecomposer {
    pub fn new(resolver: DiscountResolver) -> Self {
        Self { resolver }
    }

    pub async fn decompose(
        &self,
        company_id: &str,
        store_id: &str,
        booking_date: NaiveDate,
        unit_price: f64,
        player_count: u32,
        selections: &[RoleSelection],
    ) -> AppResult<Vec<PaymentItem>> {
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(AppError::validation(format!(
                "unit_price must be a non-negative number, got {unit_price}"
            )));
        }
        if !selections_fit(selections, player_count) {
            return Err(AppError::with_message(
                ErrorCode::RoleSelectionExceedsSeats,
                "role selections assign more seats than the order has",
            ));
        }

        let seat_base = self
            .resolver
            .resolve_calendar_discount(company_id, store_id, booking_date, unit_price)
            .await;

        // Resolve each selection's template exactly once; misses degrade to
        // undiscounted seats.
        let mut resolved = Vec::with_capacity(selections.len());
        for selection in selections {
            let template = self
                .resolver
                .resolve_template(company_id, store_id, &selection.template_id, booking_date)
                .await
                .ok();
            resolved.push(ResolvedSelection {
                count: selection.player_count,
                template,
            });
        }

        build_items(unit_price, player_count, &seat_base, &resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::DiscountKind;

    fn no_calendar(amount: f64) -> DiscountOutcome {
        DiscountOutcome::none(amount, "no calendar entry for this date")
    }

    fn student_half_off() -> TemplateSnapshot {
        TemplateSnapshot {
            template_id: "tpl-student".into(),
            role_name: "Student".into(),
            discount_kind: DiscountKind::Percentage,
            discount_value: 50.0,
        }
    }

    #[test]
    fn test_one_item_per_seat_with_role_discount() {
        // unit 100,000 x 3 players, one Student seat at 50%
        let selections = vec![ResolvedSelection { count: 1, template: Some(student_half_off()) }];
        let items = build_items(100_000.0, 3, &no_calendar(100_000.0), &selections).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].seq, 1);
        assert_eq!(items[0].original_amount, 100_000.0);
        assert_eq!(items[0].discount_amount, 50_000.0);
        assert_eq!(items[0].final_amount, 50_000.0);
        assert_eq!(items[0].template.as_ref().unwrap().role_name, "Student");

        for item in &items[1..] {
            assert_eq!(item.original_amount, 100_000.0);
            assert_eq!(item.discount_amount, 0.0);
            assert_eq!(item.final_amount, 100_000.0);
            assert!(item.template.is_none());
        }

        let total: f64 = items.iter().map(|i| i.final_amount).sum();
        assert_eq!(total, 250_000.0);
    }

    #[test]
    fn test_selection_count_spans_multiple_seats() {
        let selections = vec![ResolvedSelection { count: 2, template: Some(student_half_off()) }];
        let items = build_items(100_000.0, 4, &no_calendar(100_000.0), &selections).unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].final_amount, 50_000.0);
        assert_eq!(items[1].final_amount, 50_000.0);
        assert_eq!(items[2].final_amount, 100_000.0);
        // Sequence numbers stay 1-based and dense
        let seqs: Vec<u32> = items.iter().map(|i| i.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_over_assignment_rejected() {
        let selections = vec![ResolvedSelection { count: 4, template: Some(student_half_off()) }];
        let err = build_items(100_000.0, 3, &no_calendar(100_000.0), &selections).unwrap_err();
        assert_eq!(err.code, ErrorCode::RoleSelectionExceedsSeats);
    }

    #[test]
    fn test_zero_unit_price_yields_empty_decomposition() {
        let items = build_items(0.0, 3, &no_calendar(0.0), &[]).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_zero_players_yields_empty_decomposition() {
        let items = build_items(100_000.0, 0, &no_calendar(100_000.0), &[]).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_missed_template_degrades_to_undiscounted_seat() {
        let selections = vec![ResolvedSelection { count: 1, template: None }];
        let items = build_items(100_000.0, 2, &no_calendar(100_000.0), &selections).unwrap();
        assert_eq!(items[0].discount_amount, 0.0);
        assert_eq!(items[0].final_amount, 100_000.0);
    }

    #[test]
    fn test_calendar_base_applies_to_every_seat() {
        // Calendar already took the unit price to 90,000; the Student seat
        // halves the running amount, the plain seat keeps it.
        let seat_base = DiscountOutcome {
            original_amount: 100_000.0,
            discount_amount: 10_000.0,
            discounted_amount: 90_000.0,
            applied: vec![AppliedDiscount {
                source: shared::order::DiscountSource::Calendar,
                source_id: None,
                label: "holiday".into(),
                discount_kind: DiscountKind::Percentage,
                discount_value: 10.0,
                calculated_amount: 10_000.0,
            }],
            note: None,
        };
        let selections = vec![ResolvedSelection { count: 1, template: Some(student_half_off()) }];
        let items = build_items(100_000.0, 2, &seat_base, &selections).unwrap();

        assert_eq!(items[0].final_amount, 45_000.0);
        assert_eq!(items[0].discount_amount, 55_000.0);
        assert_eq!(items[0].applied.len(), 2);

        assert_eq!(items[1].final_amount, 90_000.0);
        assert_eq!(items[1].discount_amount, 10_000.0);
        assert_eq!(items[1].applied.len(), 1);
    }

    #[test]
    fn test_per_item_rounding_sums_within_a_cent() {
        // 3 seats at 33.33% off 100.00: per-seat discount rounds to 33.33,
        // so the summed total is exactly 3 x 66.67
        let snapshot = TemplateSnapshot {
            template_id: "tpl-1".into(),
            role_name: "Promo".into(),
            discount_kind: DiscountKind::Percentage,
            discount_value: 33.33,
        };
        let selections = vec![ResolvedSelection { count: 3, template: Some(snapshot) }];
        let items = build_items(100.0, 3, &no_calendar(100.0), &selections).unwrap();
        let total: f64 = items.iter().map(|i| i.final_amount).sum();
        assert!((total - 200.01).abs() < 0.005);
    }
}
