//! Custom error types for splitledger
//!
//! This module defines the error hierarchy for the library using thiserror.
//! Every validation failure carries an [`ErrorKind`] so adapters can surface a
//! stable machine-readable code next to the human-readable message.

use std::fmt;

use thiserror::Error;

use crate::models::{Money, Percentage, SplitKind};

/// Stable classification of every error the library can return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptySplits,
    TypeMismatch,
    SumMismatch,
    PercentMismatch,
    InvalidAmount,
    UnknownUser,
    NotFound,
    Config,
    Io,
    Parse,
    Lock,
}

impl ErrorKind {
    /// The wire code for this kind (e.g. `SUM_MISMATCH`)
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptySplits => "EMPTY_SPLITS",
            Self::TypeMismatch => "TYPE_MISMATCH",
            Self::SumMismatch => "SUM_MISMATCH",
            Self::PercentMismatch => "PERCENT_MISMATCH",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::UnknownUser => "UNKNOWN_USER",
            Self::NotFound => "NOT_FOUND",
            Self::Config => "CONFIG",
            Self::Io => "IO",
            Self::Parse => "PARSE",
            Self::Lock => "LOCK",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The main error type for splitledger operations
#[derive(Error, Debug)]
pub enum SplitLedgerError {
    /// An expense was submitted without any participants
    #[error("Expense has no splits")]
    EmptySplits,

    /// A split's variant disagrees with the expense's declared kind
    #[error("Split for '{participant}' is {found} but the expense is {expected}")]
    TypeMismatch {
        participant: String,
        expected: SplitKind,
        found: SplitKind,
    },

    /// A raw split names both an amount and a percentage
    #[error("Split for '{participant}' gives both an amount and a percentage")]
    AmbiguousSplit { participant: String },

    /// EXACT split amounts do not add up to the expense total
    #[error("Exact splits total {actual} but the expense amount is {expected}")]
    SumMismatch { expected: Money, actual: Money },

    /// PERCENT split percentages do not add up to 100
    #[error("Percent splits total {actual}, expected 100%")]
    PercentMismatch { actual: Percentage },

    /// A monetary amount or share is zero, negative or unparseable
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Payer or split participant is not registered
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Input decoding errors (JSON, YAML, CLI arguments)
    #[error("Parse error: {0}")]
    Parse(String),

    /// The ledger lock was poisoned by a panicking writer
    #[error("Lock error: {0}")]
    Lock(String),
}

impl SplitLedgerError {
    /// Create a "not found" error for participants
    pub fn participant_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Participant",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptySplits => ErrorKind::EmptySplits,
            Self::TypeMismatch { .. } | Self::AmbiguousSplit { .. } => ErrorKind::TypeMismatch,
            Self::SumMismatch { .. } => ErrorKind::SumMismatch,
            Self::PercentMismatch { .. } => ErrorKind::PercentMismatch,
            Self::InvalidAmount(_) => ErrorKind::InvalidAmount,
            Self::UnknownUser(_) => ErrorKind::UnknownUser,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Lock(_) => ErrorKind::Lock,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error was caused by caller input rather than the environment
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptySplits
                | Self::TypeMismatch { .. }
                | Self::AmbiguousSplit { .. }
                | Self::SumMismatch { .. }
                | Self::PercentMismatch { .. }
                | Self::InvalidAmount(_)
                | Self::UnknownUser(_)
        )
    }
}

impl From<std::io::Error> for SplitLedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SplitLedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for SplitLedgerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type alias for splitledger operations
pub type SplitLedgerResult<T> = Result<T, SplitLedgerError>;
