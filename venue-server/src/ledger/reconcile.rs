//! Reconciliation Aggregator
//!
//! Recomputes order-level summary statistics from the ledger on every
//! mutation, and serves the order summary read path for both reconciliation
//! modes. For multi-payment orders the summary is derived only from the live
//! Player/Payment tables — the cached summary block on the order header is
//! never treated as authoritative.

use super::context::{LedgerContext, LedgerResult};
use super::money::{MONEY_TOLERANCE, to_decimal, to_f64};
use rust_decimal::Decimal;
use shared::order::{
    HeaderPaymentStatus, Order, OrderSummary, Payment, Player, PlayerPaymentStatus,
};

/// Sum of confirmed payments covering a player
///
/// The full amount of every confirmed covering payment counts toward the
/// player; allocation across co-covered players is intentionally not
/// modeled (the ledger's coverage rule, not an accident).
pub fn paid_toward(player_id: &str, payments: &[Payment]) -> Decimal {
    payments
        .iter()
        .filter(|p| p.is_confirmed() && p.covers(player_id))
        .map(|p| to_decimal(p.amount))
        .sum()
}

/// Derive a player's status from the confirmed payments covering it
///
/// Always computed from the full payment set, never incrementally, so the
/// derivation is naturally idempotent. `Refunded` is terminal and preserved.
pub fn derive_player_status(player: &Player, payments: &[Payment]) -> PlayerPaymentStatus {
    if player.payment_status == PlayerPaymentStatus::Refunded {
        return PlayerPaymentStatus::Refunded;
    }
    let covered = paid_toward(&player.id, payments);
    let owed = to_decimal(player.final_amount);
    if covered + MONEY_TOLERANCE >= owed {
        PlayerPaymentStatus::Paid
    } else if covered > Decimal::ZERO {
        PlayerPaymentStatus::Partial
    } else {
        PlayerPaymentStatus::Pending
    }
}

/// Multi-payment path: summary derived only from the live tables
pub fn summarize_ledger(players: &[Player], payments: &[Payment]) -> OrderSummary {
    let total_original: Decimal = players.iter().map(|p| to_decimal(p.original_amount)).sum();
    let total_discount: Decimal = players.iter().map(|p| to_decimal(p.discount_amount)).sum();
    let total_final: Decimal = players.iter().map(|p| to_decimal(p.final_amount)).sum();

    let players_with_discount = players.iter().filter(|p| p.has_discount()).count() as u32;
    let players_without_discount = players.len() as u32 - players_with_discount;

    let paid: Decimal = payments
        .iter()
        .filter(|p| p.is_confirmed())
        .map(|p| to_decimal(p.amount))
        .sum();
    let pending: Decimal = payments
        .iter()
        .filter(|p| p.is_pending())
        .map(|p| to_decimal(p.amount))
        .sum();

    let discount_percent = if total_original > Decimal::ZERO {
        to_f64(total_discount / total_original * Decimal::ONE_HUNDRED)
    } else {
        0.0
    };
    let completion_percent = if total_final > Decimal::ZERO {
        to_f64((paid / total_final * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED))
    } else {
        100.0
    };

    let confirmed_times: Vec<i64> = payments
        .iter()
        .filter(|p| p.is_confirmed())
        .filter_map(|p| p.confirmed_at)
        .collect();

    OrderSummary {
        total_original_amount: to_f64(total_original),
        total_discount_amount: to_f64(total_discount),
        total_final_amount: to_f64(total_final),
        players_with_discount,
        players_without_discount,
        paid_amount: to_f64(paid),
        pending_amount: to_f64(pending),
        discount_percent,
        completion_percent,
        first_payment_at: confirmed_times.iter().min().copied(),
        last_payment_at: confirmed_times.iter().max().copied(),
        payments_total: payments.len() as u32,
        synthesized: false,
    }
}

/// Paid amount implied by a single-payment order's header tri-state
fn header_paid_amount(order: &Order) -> f64 {
    match order.payment_status {
        HeaderPaymentStatus::Full => order.total_amount,
        HeaderPaymentStatus::Deposit => order
            .deposit_amount
            .unwrap_or(0.0)
            .min(order.total_amount),
        HeaderPaymentStatus::NotYet => 0.0,
    }
}

/// Single-payment path: summary derived from the order header
///
/// There is no per-player granularity; player-level figures are a uniform
/// split of the header total, marked `synthesized`.
pub fn synthesize_header_summary(order: &Order) -> OrderSummary {
    let total = to_decimal(order.total_amount);
    let paid = to_decimal(header_paid_amount(order));
    let completion_percent = if total > Decimal::ZERO {
        to_f64((paid / total * Decimal::ONE_HUNDRED).min(Decimal::ONE_HUNDRED))
    } else {
        100.0
    };

    OrderSummary {
        total_original_amount: order.total_amount,
        total_discount_amount: 0.0,
        total_final_amount: order.total_amount,
        players_with_discount: 0,
        players_without_discount: order.player_count,
        paid_amount: to_f64(paid),
        pending_amount: to_f64((total - paid).max(Decimal::ZERO)),
        discount_percent: 0.0,
        completion_percent,
        first_payment_at: None,
        last_payment_at: None,
        payments_total: 0,
        synthesized: true,
    }
}

/// Synthesize uniform player records for a single-payment order
///
/// Purely for display symmetry with the multi-payment path. Per-seat
/// amounts are rounded individually, with the last seat absorbing the
/// rounding remainder so the rounded seats still sum to the header total.
pub fn synthesize_players(order: &Order) -> Vec<Player> {
    if order.player_count == 0 {
        return Vec::new();
    }
    let n = order.player_count;
    let per = to_f64(to_decimal(order.total_amount) / Decimal::from(n));
    let last = to_f64(to_decimal(order.total_amount) - to_decimal(per) * Decimal::from(n - 1));

    let status = match order.payment_status {
        HeaderPaymentStatus::Full => PlayerPaymentStatus::Paid,
        HeaderPaymentStatus::Deposit => PlayerPaymentStatus::Partial,
        HeaderPaymentStatus::NotYet => PlayerPaymentStatus::Pending,
    };

    (1..=n)
        .map(|seq| {
            let amount = if seq == n { last } else { per };
            Player {
                id: format!("{}-seat-{}", order.id, seq),
                order_id: order.id.clone(),
                seq,
                name: None,
                phone: None,
                role_template_id: None,
                template: None,
                applied: vec![],
                original_amount: amount,
                discount_amount: 0.0,
                final_amount: amount,
                payment_status: status,
            }
        })
        .collect()
}

/// Refresh an order's player statuses and summary cache
///
/// Runs inside the action's transaction: every covered player's status is
/// recomputed from a fresh read of all its covering payments, then the
/// summary cache on the header is replaced.
pub fn refresh_order(ctx: &LedgerContext<'_>, order_id: &str) -> LedgerResult<()> {
    let mut order = ctx.require_order(order_id)?;

    if order.enable_multi_payment {
        let players = ctx.get_players(order_id)?;
        let payments = ctx.get_payments(order_id)?;

        let mut refreshed = Vec::with_capacity(players.len());
        for mut player in players {
            let status = derive_player_status(&player, &payments);
            if status != player.payment_status {
                player.payment_status = status;
                ctx.store_player(&player)?;
            }
            refreshed.push(player);
        }

        order.summary = summarize_ledger(&refreshed, &payments);
    } else {
        order.summary = synthesize_header_summary(&order);
    }

    order.updated_at = ctx.now();
    ctx.store_order(&order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::order::{PayerInfo, PaymentStatus};

    fn player(id: &str, final_amount: f64, discount: f64) -> Player {
        Player {
            id: id.to_string(),
            order_id: "order-1".into(),
            seq: 1,
            name: None,
            phone: None,
            role_template_id: None,
            template: None,
            applied: vec![],
            original_amount: final_amount + discount,
            discount_amount: discount,
            final_amount,
            payment_status: PlayerPaymentStatus::Pending,
        }
    }

    fn payment(id: &str, amount: f64, status: PaymentStatus, covers: &[&str]) -> Payment {
        Payment {
            id: id.to_string(),
            order_id: "order-1".into(),
            payer: PayerInfo { name: "Kim".into(), phone: None },
            amount,
            method: "CARD".into(),
            status,
            player_ids: covers.iter().map(|s| s.to_string()).collect(),
            proof_refs: vec![],
            note: None,
            cancel_reason: None,
            created_at: 10,
            confirmed_at: (status == PaymentStatus::Confirmed).then_some(20),
        }
    }

    fn order_header(status: HeaderPaymentStatus, deposit: Option<f64>) -> Order {
        Order {
            id: "order-1".into(),
            company_id: "c1".into(),
            store_id: "s1".into(),
            customer: None,
            booking_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            unit_price: 50_000.0,
            player_count: 4,
            enable_multi_payment: false,
            total_amount: 200_000.0,
            deposit_amount: deposit,
            payment_status: status,
            summary: OrderSummary::default(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_overpayment_marks_player_paid() {
        // 60,000 confirmed against a 50,000 seat: paid, overpayment tolerated
        let p = player("pl-1", 50_000.0, 50_000.0);
        let payments = vec![payment("pay-1", 60_000.0, PaymentStatus::Confirmed, &["pl-1"])];
        assert_eq!(derive_player_status(&p, &payments), PlayerPaymentStatus::Paid);
    }

    #[test]
    fn test_partial_then_paid_across_multiple_payments() {
        // deposit + balance across two confirmed payments
        let p = player("pl-1", 100_000.0, 0.0);
        let deposit = payment("pay-1", 40_000.0, PaymentStatus::Confirmed, &["pl-1"]);
        assert_eq!(
            derive_player_status(&p, &[deposit.clone()]),
            PlayerPaymentStatus::Partial
        );
        let balance = payment("pay-2", 60_000.0, PaymentStatus::Confirmed, &["pl-1"]);
        assert_eq!(
            derive_player_status(&p, &[deposit, balance]),
            PlayerPaymentStatus::Paid
        );
    }

    #[test]
    fn test_pending_payments_do_not_count() {
        let p = player("pl-1", 50_000.0, 0.0);
        let payments = vec![payment("pay-1", 50_000.0, PaymentStatus::Pending, &["pl-1"])];
        assert_eq!(derive_player_status(&p, &payments), PlayerPaymentStatus::Pending);
    }

    #[test]
    fn test_free_seat_is_born_paid() {
        let p = player("pl-1", 0.0, 100_000.0);
        assert_eq!(derive_player_status(&p, &[]), PlayerPaymentStatus::Paid);
    }

    #[test]
    fn test_refunded_is_terminal() {
        let mut p = player("pl-1", 50_000.0, 0.0);
        p.payment_status = PlayerPaymentStatus::Refunded;
        let payments = vec![payment("pay-1", 50_000.0, PaymentStatus::Confirmed, &["pl-1"])];
        assert_eq!(derive_player_status(&p, &payments), PlayerPaymentStatus::Refunded);
    }

    #[test]
    fn test_summarize_ledger_totals() {
        let players = vec![
            player("pl-1", 50_000.0, 50_000.0),
            player("pl-2", 100_000.0, 0.0),
            player("pl-3", 100_000.0, 0.0),
        ];
        let payments = vec![
            payment("pay-1", 60_000.0, PaymentStatus::Confirmed, &["pl-1"]),
            payment("pay-2", 100_000.0, PaymentStatus::Pending, &["pl-2"]),
            payment("pay-3", 30_000.0, PaymentStatus::Cancelled, &["pl-3"]),
        ];

        let summary = summarize_ledger(&players, &payments);
        assert_eq!(summary.total_original_amount, 300_000.0);
        assert_eq!(summary.total_discount_amount, 50_000.0);
        assert_eq!(summary.total_final_amount, 250_000.0);
        assert_eq!(summary.players_with_discount, 1);
        assert_eq!(summary.players_without_discount, 2);
        assert_eq!(summary.paid_amount, 60_000.0);
        assert_eq!(summary.pending_amount, 100_000.0);
        assert_eq!(summary.payments_total, 3);
        assert_eq!(summary.first_payment_at, Some(20));
        assert!(!summary.synthesized);
        assert!((summary.discount_percent - 16.67).abs() < 0.01);
        assert_eq!(summary.completion_percent, 24.0);
    }

    #[test]
    fn test_discount_percent_zero_when_original_zero() {
        let summary = summarize_ledger(&[], &[]);
        assert_eq!(summary.discount_percent, 0.0);
        assert_eq!(summary.completion_percent, 100.0);
    }

    #[test]
    fn test_header_summary_full() {
        let summary = synthesize_header_summary(&order_header(HeaderPaymentStatus::Full, None));
        assert_eq!(summary.paid_amount, 200_000.0);
        assert_eq!(summary.pending_amount, 0.0);
        assert_eq!(summary.completion_percent, 100.0);
        assert!(summary.synthesized);
    }

    #[test]
    fn test_header_summary_deposit() {
        let summary = synthesize_header_summary(&order_header(
            HeaderPaymentStatus::Deposit,
            Some(50_000.0),
        ));
        assert_eq!(summary.paid_amount, 50_000.0);
        assert_eq!(summary.pending_amount, 150_000.0);
        assert_eq!(summary.completion_percent, 25.0);
    }

    #[test]
    fn test_synthesized_players_split_evenly_and_sum_exactly() {
        let mut order = order_header(HeaderPaymentStatus::Deposit, Some(50_000.0));
        order.player_count = 3;
        order.total_amount = 100_000.0;
        let players = synthesize_players(&order);

        assert_eq!(players.len(), 3);
        assert_eq!(players[0].final_amount, 33_333.33);
        assert_eq!(players[1].final_amount, 33_333.33);
        assert_eq!(players[2].final_amount, 33_333.34);
        let total: f64 = players.iter().map(|p| p.final_amount).sum();
        assert!((total - 100_000.0).abs() < 0.005);
        assert!(players.iter().all(|p| p.payment_status == PlayerPaymentStatus::Partial));
    }
}
