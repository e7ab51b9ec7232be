//! Service layer for splitledger
//!
//! The split policy engine, expense construction, the participant registry
//! and the [`ExpenseGroup`] context that ties them to the balance ledger.

pub mod expense;
pub mod group;
pub mod registry;
pub mod split;

pub use expense::create_expense;
pub use group::{ExpenseGroup, RecordExpense};
pub use registry::ParticipantRegistry;
pub use split::compute_splits;
