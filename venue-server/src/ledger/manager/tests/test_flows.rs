//! Happy-path ledger flows

use super::*;
use shared::order::{
    MergeTarget, PaymentChanges, PaymentStatus, PlayerPaymentStatus, SplitSpec,
};

#[test]
fn test_create_order_seeds_players_and_summary() {
    let manager = manager();
    let order = seed_student_order(&manager);

    let players = manager.get_players(&order.id).unwrap();
    assert_eq!(players.len(), 3);
    assert_eq!(players[0].final_amount, 50_000.0);
    assert_eq!(players[1].final_amount, 100_000.0);
    assert_eq!(players[2].final_amount, 100_000.0);
    assert!(players.iter().all(|p| p.payment_status == PlayerPaymentStatus::Pending));

    // Summary cache was refreshed in the creating transaction
    let stored = manager.get_order(&order.id).unwrap();
    assert_eq!(stored.summary.total_final_amount, 250_000.0);
    assert_eq!(stored.summary.total_original_amount, 300_000.0);
    assert_eq!(stored.summary.players_with_discount, 1);
}

#[test]
fn test_confirm_overpayment_marks_player_paid() {
    // Payment of 60,000 covering the 50,000 seat: paid, others untouched
    let manager = manager();
    let order = seed_student_order(&manager);
    let players = manager.get_players(&order.id).unwrap();

    let payment = manager
        .create_payment(&order.id, payment_draft(60_000.0, vec![players[0].id.clone()]))
        .unwrap()
        .value;
    assert_eq!(payment.status, PaymentStatus::Pending);

    // Pending payments change nothing yet
    let players = manager.get_players(&order.id).unwrap();
    assert_eq!(players[0].payment_status, PlayerPaymentStatus::Pending);

    manager.confirm_payment(&payment.id).unwrap();

    let players = manager.get_players(&order.id).unwrap();
    assert_eq!(players[0].payment_status, PlayerPaymentStatus::Paid);
    assert_eq!(players[1].payment_status, PlayerPaymentStatus::Pending);
    assert_eq!(players[2].payment_status, PlayerPaymentStatus::Pending);

    let summary = manager.get_order_summary(&order.id).unwrap();
    assert_eq!(summary.paid_amount, 60_000.0);
    assert_eq!(summary.completion_percent, 24.0);
    assert!(summary.first_payment_at.is_some());
}

#[test]
fn test_confirm_is_not_double_counted() {
    let manager = manager();
    let order = seed_student_order(&manager);
    let players = manager.get_players(&order.id).unwrap();

    let payment = manager
        .create_payment(&order.id, payment_draft(30_000.0, vec![players[0].id.clone()]))
        .unwrap()
        .value;
    manager.confirm_payment(&payment.id).unwrap();

    let err = manager.confirm_payment(&payment.id).unwrap_err();
    assert!(matches!(err, crate::ledger::LedgerError::AlreadyConfirmed(_)));

    // 30,000 against a 50,000 seat stays partial, counted exactly once
    let players = manager.get_players(&order.id).unwrap();
    assert_eq!(players[0].payment_status, PlayerPaymentStatus::Partial);
    let summary = manager.get_order_summary(&order.id).unwrap();
    assert_eq!(summary.paid_amount, 30_000.0);
}

#[test]
fn test_deposit_plus_balance_settles_player() {
    let manager = manager();
    let order = seed_student_order(&manager);
    let players = manager.get_players(&order.id).unwrap();
    let seat2 = players[1].id.clone();

    let deposit = manager
        .create_payment(&order.id, payment_draft(40_000.0, vec![seat2.clone()]))
        .unwrap()
        .value;
    manager.confirm_payment(&deposit.id).unwrap();
    assert_eq!(
        manager.get_players(&order.id).unwrap()[1].payment_status,
        PlayerPaymentStatus::Partial
    );

    let balance = manager
        .create_payment(&order.id, payment_draft(60_000.0, vec![seat2]))
        .unwrap()
        .value;
    manager.confirm_payment(&balance.id).unwrap();
    assert_eq!(
        manager.get_players(&order.id).unwrap()[1].payment_status,
        PlayerPaymentStatus::Paid
    );
}

#[test]
fn test_update_pending_payment() {
    let manager = manager();
    let order = seed_student_order(&manager);
    let players = manager.get_players(&order.id).unwrap();

    let payment = manager
        .create_payment(&order.id, payment_draft(10_000.0, vec![players[0].id.clone()]))
        .unwrap()
        .value;

    let updated = manager
        .update_payment(
            &payment.id,
            PaymentChanges {
                amount: Some(50_000.0),
                player_ids: Some(vec![players[0].id.clone(), players[1].id.clone()]),
                proof_refs: Some(vec!["proof://receipt-1".into()]),
                ..Default::default()
            },
        )
        .unwrap()
        .value;

    assert_eq!(updated.amount, 50_000.0);
    assert_eq!(updated.player_ids.len(), 2);
    assert_eq!(updated.proof_refs, vec!["proof://receipt-1".to_string()]);
}

#[test]
fn test_cancel_pending_payment_keeps_players_pending() {
    let manager = manager();
    let order = seed_student_order(&manager);
    let players = manager.get_players(&order.id).unwrap();

    let payment = manager
        .create_payment(&order.id, payment_draft(50_000.0, vec![players[0].id.clone()]))
        .unwrap()
        .value;
    let cancelled = manager
        .cancel_payment(&payment.id, Some("customer changed card".into()))
        .unwrap()
        .value;
    assert_eq!(cancelled.status, PaymentStatus::Cancelled);
    assert_eq!(cancelled.cancel_reason.as_deref(), Some("customer changed card"));

    let summary = manager.get_order_summary(&order.id).unwrap();
    assert_eq!(summary.paid_amount, 0.0);
    assert_eq!(summary.pending_amount, 0.0);
}

#[test]
fn test_merge_then_split_round_trip_restores_statuses() {
    let manager = manager();
    let order = seed_student_order(&manager);
    let players = manager.get_players(&order.id).unwrap();
    let (seat1, seat2) = (players[0].id.clone(), players[1].id.clone());

    // P1 settles seat 1 (50,000), P2 partially covers seat 2 (30,000 of 100,000)
    let p1 = manager
        .create_payment(&order.id, payment_draft(50_000.0, vec![seat1.clone()]))
        .unwrap()
        .value;
    let p2 = manager
        .create_payment(&order.id, payment_draft(30_000.0, vec![seat2.clone()]))
        .unwrap()
        .value;
    manager.confirm_payment(&p1.id).unwrap();
    manager.confirm_payment(&p2.id).unwrap();

    let before: Vec<PlayerPaymentStatus> = manager
        .get_players(&order.id)
        .unwrap()
        .iter()
        .map(|p| p.payment_status)
        .collect();
    assert_eq!(before[0], PlayerPaymentStatus::Paid);
    assert_eq!(before[1], PlayerPaymentStatus::Partial);

    // Merge: one payment of 80,000 covering both seats, originals gone
    let merged = manager
        .merge_payments(&order.id, vec![p1.id.clone(), p2.id.clone()], MergeTarget::default())
        .unwrap()
        .value;
    assert_eq!(merged.amount, 80_000.0);
    assert_eq!(merged.status, PaymentStatus::Confirmed);
    assert_eq!(merged.player_ids, vec![seat1.clone(), seat2.clone()]);
    assert_eq!(manager.get_payments(&order.id).unwrap().len(), 1);
    assert!(manager.get_payment(&p1.id).is_err());

    // Split back into the original amounts and coverage
    let parts = manager
        .split_payment(
            &merged.id,
            vec![
                SplitSpec { amount: 50_000.0, player_ids: vec![seat1], payer: None, note: None },
                SplitSpec { amount: 30_000.0, player_ids: vec![seat2], payer: None, note: None },
            ],
        )
        .unwrap();
    assert!(parts.warnings.is_empty());
    assert_eq!(parts.value.len(), 2);

    let after: Vec<PlayerPaymentStatus> = manager
        .get_players(&order.id)
        .unwrap()
        .iter()
        .map(|p| p.payment_status)
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_split_write_off_returns_warning() {
    let manager = manager();
    let order = seed_student_order(&manager);
    let players = manager.get_players(&order.id).unwrap();
    let (seat1, seat2) = (players[0].id.clone(), players[1].id.clone());

    let payment = manager
        .create_payment(&order.id, payment_draft(100_000.0, vec![seat1.clone(), seat2.clone()]))
        .unwrap()
        .value;

    // Parts sum to 90,000 against a 100,000 original: allowed, but flagged
    let outcome = manager
        .split_payment(
            &payment.id,
            vec![
                SplitSpec { amount: 60_000.0, player_ids: vec![seat1], payer: None, note: None },
                SplitSpec { amount: 30_000.0, player_ids: vec![seat2], payer: None, note: None },
            ],
        )
        .unwrap();

    assert_eq!(outcome.value.len(), 2);
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("90000.00"));
}

#[test]
fn test_delete_payment_recomputes_as_if_never_existed() {
    let manager = manager();
    let order = seed_student_order(&manager);
    let players = manager.get_players(&order.id).unwrap();

    let payment = manager
        .create_payment(&order.id, payment_draft(50_000.0, vec![players[0].id.clone()]))
        .unwrap()
        .value;
    manager.confirm_payment(&payment.id).unwrap();
    assert_eq!(
        manager.get_players(&order.id).unwrap()[0].payment_status,
        PlayerPaymentStatus::Paid
    );

    manager.delete_payment(&payment.id).unwrap();

    // Player survives; status falls back to pending
    let players = manager.get_players(&order.id).unwrap();
    assert_eq!(players.len(), 3);
    assert_eq!(players[0].payment_status, PlayerPaymentStatus::Pending);
    assert_eq!(manager.get_order_summary(&order.id).unwrap().paid_amount, 0.0);
}

#[test]
fn test_delete_order_cascades() {
    let manager = manager();
    let order = seed_student_order(&manager);
    let players = manager.get_players(&order.id).unwrap();
    let payment = manager
        .create_payment(&order.id, payment_draft(50_000.0, vec![players[0].id.clone()]))
        .unwrap()
        .value;

    manager.delete_order(&order.id).unwrap();

    assert!(manager.get_order(&order.id).is_err());
    assert!(manager.get_players(&order.id).unwrap().is_empty());
    assert!(manager.get_payments(&order.id).unwrap().is_empty());
    assert!(manager.get_payment(&payment.id).is_err());
}

#[test]
fn test_single_payment_order_synthesizes_detail() {
    let manager = manager();
    let mut order_draft = draft(50_000.0, 4, false);
    order_draft.payment_status = shared::order::HeaderPaymentStatus::Full;
    let order = manager.create_order(order_draft, vec![]).unwrap().value;

    let detail = manager.get_order_detail(&order.id).unwrap();
    assert!(detail.summary.synthesized);
    assert_eq!(detail.summary.total_final_amount, 200_000.0);
    assert_eq!(detail.summary.completion_percent, 100.0);
    assert_eq!(detail.players.len(), 4);
    assert_eq!(detail.players[0].final_amount, 50_000.0);
    assert!(detail.payments.is_empty());
    assert!(
        detail
            .players
            .iter()
            .all(|p| p.payment_status == PlayerPaymentStatus::Paid)
    );
}

#[test]
fn test_summary_shape_is_identical_across_paths() {
    let manager = manager();

    let multi = seed_student_order(&manager);
    let single = manager.create_order(draft(50_000.0, 2, false), vec![]).unwrap().value;

    let multi_summary = serde_json::to_value(manager.get_order_summary(&multi.id).unwrap()).unwrap();
    let single_summary =
        serde_json::to_value(manager.get_order_summary(&single.id).unwrap()).unwrap();

    let multi_keys: Vec<&String> = multi_summary.as_object().unwrap().keys().collect();
    let single_keys: Vec<&String> = single_summary.as_object().unwrap().keys().collect();
    assert_eq!(multi_keys, single_keys);
    assert_eq!(single_summary["synthesized"], true);
    assert_eq!(multi_summary["synthesized"], false);
}
