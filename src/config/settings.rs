//! User settings for splitledger
//!
//! Presentation and logging preferences. Ledger state is never persisted.

use serde::{Deserialize, Serialize};

use super::paths::SplitLedgerPaths;
use crate::error::SplitLedgerError;

/// How balances are printed by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One sentence per balance
    #[default]
    Text,
    /// Aligned table
    Table,
    /// JSON document
    Json,
    /// CSV rows
    Csv,
}

/// User settings for splitledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in tables and detail views
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Default `tracing` filter directive (overridden by `RUST_LOG`)
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Output format used when none is given on the command line
    #[serde(default)]
    pub default_output: OutputFormat,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_log_filter() -> String {
    "splitledger=info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            log_filter: default_log_filter(),
            default_output: OutputFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &SplitLedgerPaths) -> Result<Self, SplitLedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SplitLedgerError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SplitLedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SplitLedgerPaths) -> Result<(), SplitLedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SplitLedgerError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            SplitLedgerError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
