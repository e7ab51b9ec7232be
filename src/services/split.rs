//! Split policy engine
//!
//! Turns an expense total and a list of raw per-participant inputs into the
//! finalized splits. The engine is a pure function: it touches no registry and
//! no ledger, so every policy can be tested in isolation.

use crate::error::{SplitLedgerError, SplitLedgerResult};
use crate::models::{Money, Percentage, Split, SplitInput, SplitKind};

/// Compute finalized splits for `amount` under `kind`
///
/// Checks run in a fixed order: empty input, non-positive total, mixed
/// variants, then the kind-specific reconciliation rule.
///
/// # Examples
/// ```
/// use splitledger::models::{Money, SplitInput, SplitKind};
/// use splitledger::services::split::compute_splits;
///
/// let splits = compute_splits(
///     SplitKind::Equal,
///     Money::from_cents(10000),
///     &[SplitInput::equal("u1"), SplitInput::equal("u2"), SplitInput::equal("u3")],
/// )
/// .unwrap();
/// let cents: Vec<i64> = splits.iter().map(|s| s.amount.cents()).collect();
/// assert_eq!(cents, vec![3334, 3333, 3333]);
/// ```
pub fn compute_splits(
    kind: SplitKind,
    amount: Money,
    inputs: &[SplitInput],
) -> SplitLedgerResult<Vec<Split>> {
    if inputs.is_empty() {
        return Err(SplitLedgerError::EmptySplits);
    }

    if !amount.is_positive() {
        return Err(SplitLedgerError::InvalidAmount(format!(
            "expense amount must be positive, got {}",
            amount
        )));
    }

    if let Some(odd) = inputs.iter().find(|input| input.kind() != kind) {
        return Err(SplitLedgerError::TypeMismatch {
            participant: odd.participant().to_string(),
            expected: kind,
            found: odd.kind(),
        });
    }

    match kind {
        SplitKind::Equal => split_equal(amount, inputs),
        SplitKind::Exact => split_exact(amount, inputs),
        SplitKind::Percent => split_percent(amount, inputs),
    }
}

fn overflow(what: &str) -> SplitLedgerError {
    SplitLedgerError::InvalidAmount(format!("{} exceeds the representable range", what))
}

/// Every share is the rounded quotient; the first absorbs the rounding residual
fn split_equal(amount: Money, inputs: &[SplitInput]) -> SplitLedgerResult<Vec<Split>> {
    let count = inputs.len() as i64;
    let quotient = amount.div_round(count).unwrap_or_default();

    // quotient * count can exceed i64 for amounts near the limit
    let residual = amount.cents() as i128 - quotient.cents() as i128 * count as i128;
    let first = i64::try_from(quotient.cents() as i128 + residual)
        .map(Money::from_cents)
        .map_err(|_| overflow("equal share"))?;

    Ok(inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            let share = if i == 0 { first } else { quotient };
            Split::new(input.participant().clone(), share)
        })
        .collect())
}

fn split_exact(amount: Money, inputs: &[SplitInput]) -> SplitLedgerResult<Vec<Split>> {
    let mut splits = Vec::with_capacity(inputs.len());

    for input in inputs {
        if let SplitInput::Exact {
            participant,
            amount: share,
        } = input
        {
            if share.is_negative() {
                return Err(SplitLedgerError::InvalidAmount(format!(
                    "share for '{}' is negative ({})",
                    participant, share
                )));
            }
            splits.push(Split::new(participant.clone(), *share));
        }
    }

    let actual = Money::checked_sum(splits.iter().map(|s| s.amount))
        .ok_or_else(|| overflow("sum of exact shares"))?;
    if actual != amount {
        return Err(SplitLedgerError::SumMismatch {
            expected: amount,
            actual,
        });
    }

    Ok(splits)
}

/// Shares are `amount * percent / 100` rounded to the cent; any cent left over
/// by rounding goes to the first split, as with EQUAL.
fn split_percent(amount: Money, inputs: &[SplitInput]) -> SplitLedgerResult<Vec<Split>> {
    let mut total = Percentage::zero();

    for input in inputs {
        if let SplitInput::Percent {
            participant,
            percent,
        } = input
        {
            if percent.is_negative() {
                return Err(SplitLedgerError::InvalidAmount(format!(
                    "percentage for '{}' is negative ({})",
                    participant, percent
                )));
            }
            total = total
                .checked_add(*percent)
                .ok_or_else(|| overflow("sum of percentages"))?;
        }
    }

    if total != Percentage::HUNDRED {
        return Err(SplitLedgerError::PercentMismatch { actual: total });
    }

    // Every percentage is now within 0..=100, so no share exceeds `amount`
    let mut splits: Vec<Split> = inputs
        .iter()
        .filter_map(|input| match input {
            SplitInput::Percent {
                participant,
                percent,
            } => Some(Split::with_percent(
                participant.clone(),
                percent.apply(amount),
                *percent,
            )),
            _ => None,
        })
        .collect();

    let allocated = Money::checked_sum(splits.iter().map(|s| s.amount))
        .ok_or_else(|| overflow("sum of percent shares"))?;
    let residual = amount
        .checked_sub(allocated)
        .ok_or_else(|| overflow("percent rounding residual"))?;
    if !residual.is_zero() {
        tracing::debug!(
            residual = %residual,
            "assigning percent rounding residual to first split"
        );
        if let Some(first) = splits.first_mut() {
            first.amount = first
                .amount
                .checked_add(residual)
                .ok_or_else(|| overflow("percent share"))?;
        }
    }

    Ok(splits)
}
