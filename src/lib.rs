//! splitledger - shared expense splitting and balance tracking
//!
//! Records who paid for what, splits each expense among its participants
//! (equally, by exact amounts, or by percentages) and keeps a pairwise
//! net-balance ledger that can report who owes whom at any time.
//!
//! # Architecture
//!
//! - `models`: fixed-point money and percentages, participants, splits, expenses
//! - `services`: the split policy engine, expense construction, the participant
//!   registry and the [`ExpenseGroup`] context
//! - `ledger`: the anti-symmetric balance ledger and its queries
//! - `replay`: JSON/YAML group files replayed through a fresh group
//! - `config`, `logging`, `display`, `cli`: the command-line adapter
//!
//! # Example
//!
//! ```
//! use splitledger::models::{Money, SplitInput, SplitKind};
//! use splitledger::services::{ExpenseGroup, RecordExpense};
//!
//! let group = ExpenseGroup::new();
//! group.register_participant("u1", "Alice", "alice@example.com", "555-0101")?;
//! group.register_participant("u2", "Bob", "bob@example.com", "555-0102")?;
//!
//! group.record_expense(RecordExpense::new(
//!     SplitKind::Equal,
//!     Money::from_cents(5000),
//!     "u1",
//!     vec![SplitInput::equal("u1"), SplitInput::equal("u2")],
//! ))?;
//!
//! assert_eq!(group.balances(None)?, vec!["Bob owes Alice: 25.00"]);
//! # Ok::<(), splitledger::SplitLedgerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod replay;
pub mod services;

pub use error::{ErrorKind, SplitLedgerError, SplitLedgerResult};
pub use services::ExpenseGroup;
