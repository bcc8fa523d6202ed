//! Money calculation utilities using rust_decimal for precision
//!
//! All ledger arithmetic is done using `Decimal` internally, then converted
//! to `f64` for storage/serialization.

use crate::ledger::context::LedgerError;
use rust_decimal::prelude::*;
use shared::order::{PaymentDraft, SplitSpec};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed payment amount
const MAX_PAYMENT_AMOUNT: f64 = 1_000_000_000.0;

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

/// Round an f64 amount to 2 decimal places
#[inline]
pub fn round_money(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), LedgerError> {
    if !value.is_finite() {
        return Err(LedgerError::InvalidOperation(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a payment amount: finite, positive, within bounds
pub fn validate_amount(amount: f64) -> Result<(), LedgerError> {
    require_finite(amount, "payment amount")?;
    if amount <= 0.0 {
        return Err(LedgerError::InvalidAmount);
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(LedgerError::InvalidOperation(format!(
            "payment amount exceeds maximum allowed ({}), got {}",
            MAX_PAYMENT_AMOUNT, amount
        )));
    }
    Ok(())
}

/// Validate a PaymentDraft before processing
///
/// The amount is NOT required to equal the covered players' final amounts;
/// partial and over payments are legal and reconciled at confirmation time.
pub fn validate_payment_draft(draft: &PaymentDraft) -> Result<(), LedgerError> {
    validate_amount(draft.amount)?;
    if draft.player_ids.is_empty() {
        return Err(LedgerError::CoverageInvalid(
            "a payment must cover at least one player".to_string(),
        ));
    }
    if draft.method.trim().is_empty() {
        return Err(LedgerError::Validation("payment method is required".to_string()));
    }
    if draft.payer.name.trim().is_empty() {
        return Err(LedgerError::Validation("payer name is required".to_string()));
    }
    Ok(())
}

/// Validate split specs and check whether their amounts reproduce the
/// original. Returns a soft warning when they do not: the ledger tolerates
/// deliberate write-offs.
pub fn validate_split_specs(
    original_amount: f64,
    specs: &[SplitSpec],
) -> Result<Option<String>, LedgerError> {
    if specs.is_empty() {
        return Err(LedgerError::Validation(
            "split requires at least one part".to_string(),
        ));
    }
    let mut sum = Decimal::ZERO;
    for spec in specs {
        validate_amount(spec.amount)?;
        if spec.player_ids.is_empty() {
            return Err(LedgerError::CoverageInvalid(
                "each split part must cover at least one player".to_string(),
            ));
        }
        sum += to_decimal(spec.amount);
    }

    let diff = (sum - to_decimal(original_amount)).abs();
    if diff > MONEY_TOLERANCE {
        return Ok(Some(format!(
            "split parts sum to {:.2} but the original payment is {:.2}",
            to_f64(sum),
            original_amount
        )));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::PayerInfo;

    fn draft(amount: f64, player_ids: Vec<String>) -> PaymentDraft {
        PaymentDraft {
            payer: PayerInfo { name: "Kim".into(), phone: None },
            amount,
            method: "CARD".into(),
            player_ids,
            proof_refs: vec![],
            note: None,
        }
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(50_000.0).is_ok());
        assert!(matches!(validate_amount(0.0), Err(LedgerError::InvalidAmount)));
        assert!(matches!(validate_amount(-10.0), Err(LedgerError::InvalidAmount)));
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(2_000_000_000.0).is_err());
    }

    #[test]
    fn test_draft_requires_covered_players() {
        let result = validate_payment_draft(&draft(10_000.0, vec![]));
        assert!(matches!(result, Err(LedgerError::CoverageInvalid(_))));
        assert!(validate_payment_draft(&draft(10_000.0, vec!["pl-1".into()])).is_ok());
    }

    #[test]
    fn test_split_sum_mismatch_is_a_warning_not_an_error() {
        let specs = vec![
            SplitSpec { amount: 30_000.0, player_ids: vec!["pl-1".into()], payer: None, note: None },
            SplitSpec { amount: 20_000.0, player_ids: vec!["pl-2".into()], payer: None, note: None },
        ];
        // Exact split: no warning
        assert!(validate_split_specs(50_000.0, &specs).unwrap().is_none());
        // Write-off: warning, not error
        let warning = validate_split_specs(60_000.0, &specs).unwrap();
        assert!(warning.unwrap().contains("50000.00"));
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(10.126), 10.13);
        assert_eq!(round_money(10.124), 10.12);
        assert_eq!(round_money(50_000.0), 50_000.0);
    }
}
