//! Replay a group file through an [`ExpenseGroup`]
//!
//! Users are registered first, then expenses are recorded in file order. A
//! rejected expense is collected in the report and replay moves on; the ledger
//! never sees a partial expense.

pub mod file;

use serde::Serialize;

use crate::error::{SplitLedgerError, SplitLedgerResult};
use crate::models::Expense;
use crate::services::ExpenseGroup;

pub use file::{DecimalValue, ExpenseEntry, GroupFile, SplitEntry, UserEntry};

/// An expense from the file that the ledger refused
#[derive(Debug, Clone, Serialize)]
pub struct RejectedExpense {
    /// Zero-based position in the file's `expenses` list
    pub index: usize,
    /// Stable error code (e.g. `SUM_MISMATCH`)
    pub kind: String,
    pub message: String,
}

/// Outcome of a replay
#[derive(Debug)]
pub struct ReplayReport {
    pub group: ExpenseGroup,
    pub accepted: Vec<Expense>,
    pub rejected: Vec<RejectedExpense>,
}

/// Build a fresh group from `file`
///
/// Only lock failures abort the replay; every per-expense error is reported.
pub fn replay(file: &GroupFile) -> SplitLedgerResult<ReplayReport> {
    let group = ExpenseGroup::new();

    for user in &file.users {
        group.register_participant(
            user.user_id.as_str(),
            user.name.as_str(),
            user.email.as_str(),
            user.mobile.as_str(),
        )?;
    }

    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for (index, entry) in file.expenses.iter().enumerate() {
        match entry
            .to_request()
            .and_then(|request| group.record_expense(request))
        {
            Ok(expense) => accepted.push(expense),
            Err(e @ SplitLedgerError::Lock(_)) => return Err(e),
            Err(e) => rejected.push(RejectedExpense {
                index,
                kind: e.kind().code().to_string(),
                message: e.to_string(),
            }),
        }
    }

    tracing::info!(
        users = file.users.len(),
        accepted = accepted.len(),
        rejected = rejected.len(),
        "replayed group file"
    );

    Ok(ReplayReport {
        group,
        accepted,
        rejected,
    })
}
