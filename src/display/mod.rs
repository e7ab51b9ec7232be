//! Display formatting for terminal output

pub mod balance;
pub mod expense;

pub use balance::{format_balance_lines, format_balance_table, write_balances};
pub use expense::{format_expense_details, format_split_list};
