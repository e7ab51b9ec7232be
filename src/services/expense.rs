//! Expense construction
//!
//! Binds the split engine's output to an immutable [`Expense`]. Nothing here
//! touches the ledger; callers apply the result only after this succeeds.

use chrono::Utc;

use crate::error::{SplitLedgerError, SplitLedgerResult};
use crate::models::{
    Expense, ExpenseId, ExpenseMetadata, ExpenseValidationError, Money, ParticipantId,
    SplitInput, SplitKind,
};

use super::split::compute_splits;

/// Build a validated expense
pub fn create_expense(
    kind: SplitKind,
    amount: Money,
    paid_by: ParticipantId,
    inputs: &[SplitInput],
    metadata: Option<ExpenseMetadata>,
) -> SplitLedgerResult<Expense> {
    let splits = compute_splits(kind, amount, inputs)?;

    let expense = Expense {
        id: ExpenseId::new(),
        kind,
        amount,
        paid_by,
        splits,
        metadata,
        created_at: Utc::now(),
    };

    // The engine already guarantees this; re-running it keeps creation and
    // later re-validation on the same rules.
    expense
        .validate()
        .map_err(|e| validation_error(kind, e))?;

    Ok(expense)
}

/// Map an expense validation failure to the matching ledger error
pub fn validation_error(kind: SplitKind, err: ExpenseValidationError) -> SplitLedgerError {
    match err {
        ExpenseValidationError::NoSplits => SplitLedgerError::EmptySplits,
        ExpenseValidationError::NonPositiveAmount(_) | ExpenseValidationError::SplitsOverflow => {
            SplitLedgerError::InvalidAmount(err.to_string())
        }
        ExpenseValidationError::SplitsMismatch {
            expense_amount,
            splits_total,
        } => SplitLedgerError::SumMismatch {
            expected: expense_amount,
            actual: splits_total,
        },
        ExpenseValidationError::MixedSplits {
            participant,
            has_percent,
        } => SplitLedgerError::TypeMismatch {
            participant: participant.to_string(),
            expected: kind,
            // A computed share without a percentage is a fixed amount
            found: if has_percent {
                SplitKind::Percent
            } else {
                SplitKind::Exact
            },
        },
    }
}
