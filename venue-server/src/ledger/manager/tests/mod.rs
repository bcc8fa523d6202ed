//! End-to-end ledger flow tests over in-memory storage

mod test_flows;

use crate::ledger::manager::LedgerManager;
use crate::ledger::storage::LedgerStorage;
use crate::pricing::decompose::{ResolvedSelection, build_items};
use chrono::NaiveDate;
use shared::order::{
    DiscountKind, DiscountOutcome, HeaderPaymentStatus, OrderDraft, PayerInfo, PaymentDraft,
    TemplateSnapshot,
};

pub(super) fn manager() -> LedgerManager {
    LedgerManager::with_storage(LedgerStorage::open_in_memory().unwrap())
}

pub(super) fn booking_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

pub(super) fn draft(unit_price: f64, player_count: u32, multi: bool) -> OrderDraft {
    OrderDraft {
        company_id: "c1".into(),
        store_id: "s1".into(),
        customer: None,
        booking_date: booking_date(),
        unit_price,
        player_count,
        enable_multi_payment: multi,
        role_selections: vec![],
        total_amount: None,
        deposit_amount: None,
        payment_status: HeaderPaymentStatus::NotYet,
    }
}

pub(super) fn student_template() -> TemplateSnapshot {
    TemplateSnapshot {
        template_id: "tpl-student".into(),
        role_name: "Student".into(),
        discount_kind: DiscountKind::Percentage,
        discount_value: 50.0,
    }
}

/// Seed the canonical test order: unit 100,000 x 3 seats, seat 1 on a 50%
/// Student template (finals 50,000 / 100,000 / 100,000)
pub(super) fn seed_student_order(manager: &LedgerManager) -> shared::order::Order {
    let base = DiscountOutcome::none(100_000.0, "no calendar entry for this date");
    let selections = vec![ResolvedSelection { count: 1, template: Some(student_template()) }];
    let items = build_items(100_000.0, 3, &base, &selections).unwrap();
    manager.create_order(draft(100_000.0, 3, true), items).unwrap().value
}

pub(super) fn payment_draft(amount: f64, player_ids: Vec<String>) -> PaymentDraft {
    PaymentDraft {
        payer: PayerInfo { name: "Kim".into(), phone: None },
        amount,
        method: "TRANSFER".into(),
        player_ids,
        proof_refs: vec![],
        note: None,
    }
}
