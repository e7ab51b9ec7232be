//! Expense model
//!
//! An expense is one payment event: who paid, how much, and the validated
//! splits describing who owes what. Expenses are only built by the split
//! engine and are never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, ParticipantId};
use super::money::Money;
use super::split::{Split, SplitKind};

/// Descriptive data attached to an expense; never inspected by the ledger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ExpenseMetadata {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// A validated shared expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// The policy the splits were computed with
    pub kind: SplitKind,

    /// Total amount paid (always positive)
    pub amount: Money,

    /// Who paid
    pub paid_by: ParticipantId,

    /// Per-participant shares, in input order
    pub splits: Vec<Split>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ExpenseMetadata>,

    /// When the expense was recorded
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Get the total of all splits (always equals `amount` once validated)
    ///
    /// `None` if the splits add up past the `i64` cent range.
    pub fn splits_total(&self) -> Option<Money> {
        Money::checked_sum(self.splits.iter().map(|s| s.amount))
    }

    /// Label for reports: the metadata name or the id
    pub fn label(&self) -> String {
        self.metadata
            .as_ref()
            .and_then(|m| m.name.clone())
            .unwrap_or_else(|| self.id.to_string())
    }

    /// Re-check the invariants established at creation
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.splits.is_empty() {
            return Err(ExpenseValidationError::NoSplits);
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        let splits_total = self
            .splits_total()
            .ok_or(ExpenseValidationError::SplitsOverflow)?;
        if splits_total != self.amount {
            return Err(ExpenseValidationError::SplitsMismatch {
                expense_amount: self.amount,
                splits_total,
            });
        }

        // Computed splits keep a percentage only under PERCENT
        let odd = self
            .splits
            .iter()
            .find(|s| s.percent.is_some() != (self.kind == SplitKind::Percent));
        match odd {
            Some(split) => Err(ExpenseValidationError::MixedSplits {
                participant: split.participant.clone(),
                has_percent: split.percent.is_some(),
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} paid {} split {} ways ({})",
            self.label(),
            self.paid_by,
            self.amount,
            self.splits.len(),
            self.kind
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NoSplits,
    NonPositiveAmount(Money),
    SplitsMismatch {
        expense_amount: Money,
        splits_total: Money,
    },
    SplitsOverflow,
    /// A split with (or without) a percentage under the wrong kind
    MixedSplits {
        participant: ParticipantId,
        has_percent: bool,
    },
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSplits => write!(f, "Expense has no splits"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive, got {}", amount)
            }
            Self::SplitsMismatch {
                expense_amount,
                splits_total,
            } => write!(
                f,
                "Split totals ({}) do not match expense amount ({})",
                splits_total, expense_amount
            ),
            Self::SplitsOverflow => write!(f, "Split totals exceed the representable range"),
            Self::MixedSplits { participant, .. } => {
                write!(f, "Split for '{}' does not match the expense kind", participant)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Percentage;

    fn expense(kind: SplitKind, amount: i64, splits: Vec<Split>) -> Expense {
        Expense {
            id: ExpenseId::new(),
            kind,
            amount: Money::from_cents(amount),
            paid_by: ParticipantId::from("u1"),
            splits,
            metadata: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_ok() {
        let e = expense(
            SplitKind::Exact,
            1000,
            vec![
                Split::new("u1", Money::from_cents(400)),
                Split::new("u2", Money::from_cents(600)),
            ],
        );
        assert!(e.validate().is_ok());
        assert_eq!(e.splits_total(), Some(Money::from_cents(1000)));
    }

    #[test]
    fn test_validate_mismatch() {
        let e = expense(
            SplitKind::Exact,
            1000,
            vec![Split::new("u2", Money::from_cents(900))],
        );
        assert_eq!(
            e.validate(),
            Err(ExpenseValidationError::SplitsMismatch {
                expense_amount: Money::from_cents(1000),
                splits_total: Money::from_cents(900),
            })
        );
    }

    #[test]
    fn test_validate_mixed_splits() {
        let e = expense(
            SplitKind::Percent,
            1000,
            vec![
                Split::with_percent("u1", Money::from_cents(500), Percentage::from_whole(50)),
                Split::new("u2", Money::from_cents(500)),
            ],
        );
        assert_eq!(
            e.validate(),
            Err(ExpenseValidationError::MixedSplits {
                participant: ParticipantId::from("u2"),
                has_percent: false,
            })
        );
    }

    #[test]
    fn test_validate_percent_under_exact() {
        let e = expense(
            SplitKind::Exact,
            1000,
            vec![Split::with_percent("u3", Money::from_cents(1000), Percentage::HUNDRED)],
        );
        assert_eq!(
            e.validate(),
            Err(ExpenseValidationError::MixedSplits {
                participant: ParticipantId::from("u3"),
                has_percent: true,
            })
        );
    }

    #[test]
    fn test_validate_overflowing_splits() {
        let e = expense(
            SplitKind::Exact,
            100,
            vec![
                Split::new("u1", Money::from_cents(i64::MAX)),
                Split::new("u2", Money::from_cents(i64::MAX)),
                Split::new("u3", Money::from_cents(102)),
            ],
        );
        assert_eq!(e.splits_total(), None);
        assert_eq!(e.validate(), Err(ExpenseValidationError::SplitsOverflow));
    }

    #[test]
    fn test_label_prefers_metadata_name() {
        let mut e = expense(SplitKind::Equal, 100, vec![Split::new("u1", Money::from_cents(100))]);
        assert!(e.label().starts_with("exp-"));
        e.metadata = Some(ExpenseMetadata::named("Dinner"));
        assert_eq!(e.label(), "Dinner");
    }
}
