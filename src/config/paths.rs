//! Path management for splitledger
//!
//! ## Path Resolution Order
//!
//! 1. `SPLITLEDGER_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory from `directories` (e.g.
//!    `~/.config/splitledger` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SplitLedgerError;

/// Environment variable that overrides the config directory
pub const CONFIG_DIR_ENV: &str = "SPLITLEDGER_CONFIG_DIR";

/// Manages the paths used by splitledger
#[derive(Debug, Clone)]
pub struct SplitLedgerPaths {
    base_dir: PathBuf,
}

impl SplitLedgerPaths {
    /// Resolve the config directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, SplitLedgerError> {
        let base_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => ProjectDirs::from("", "", "splitledger")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    SplitLedgerError::Config("Could not determine a config directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the config directory exists
    pub fn ensure_directories(&self) -> Result<(), SplitLedgerError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            SplitLedgerError::Io(format!("Failed to create config directory: {}", e))
        })
    }
}
