//! Balance ledger and its read-only queries

pub mod balance;
pub mod query;

pub use balance::BalanceLedger;
pub use query::{query_all, query_one, Balance};
