//! Path management for the finance tracker
//!
//! Only the settings file lives on disk; ledgers are kept in memory.
//!
//! ## Path Resolution Order
//!
//! 1. `FINANCE_TRACKER_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (`~/.config/finance-tracker` on Linux)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::FinanceError;

/// Environment variable that overrides the base directory
pub const DIR_ENV_VAR: &str = "FINANCE_TRACKER_DIR";

/// Resolves where the finance tracker keeps its files
#[derive(Debug, Clone)]
pub struct AppPaths {
    base_dir: PathBuf,
}

impl AppPaths {
    /// Resolve the base directory from the environment or platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FinanceError> {
        let base_dir = match std::env::var_os(DIR_ENV_VAR) {
            Some(custom) => PathBuf::from(custom),
            None => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Create the base directory if it is missing
    pub fn ensure_directories(&self) -> Result<(), FinanceError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FinanceError::Io(format!("Failed to create base directory: {}", e)))
    }
}

fn resolve_default_path() -> Result<PathBuf, FinanceError> {
    ProjectDirs::from("", "", "finance-tracker")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FinanceError::Config("Could not determine a home directory".into()))
}
