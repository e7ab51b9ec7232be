//! Core data models for splitledger
//!
//! Fixed-point money and percentages, participants, split inputs and the
//! immutable expense record.

pub mod expense;
pub mod ids;
pub mod money;
pub mod participant;
pub mod percent;
pub mod split;

pub use expense::{Expense, ExpenseMetadata, ExpenseValidationError};
pub use ids::{ExpenseId, ParticipantId};
pub use money::{Money, MoneyParseError};
pub use participant::Participant;
pub use percent::Percentage;
pub use split::{Split, SplitInput, SplitKind};
