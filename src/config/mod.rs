//! Configuration module for splitledger
//!
//! - Config directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::SplitLedgerPaths;
pub use settings::{OutputFormat, Settings};
