//! User settings for the finance tracker
//!
//! Display preferences plus the knobs that shape a new session: how many
//! deletions can be undone, where transaction numbering starts and an
//! optional overall spending limit to start with.

use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::AppPaths;
use crate::error::FinanceError;
use crate::models::Money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How many deletions can be undone; unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undo_depth: Option<usize>,

    /// Id given to the first transaction of a session
    #[serde(default = "default_first_transaction_id")]
    pub first_transaction_id: u64,

    /// Overall spending limit applied to new sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_overall_limit: Option<Money>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_first_transaction_id() -> u64 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            undo_depth: None,
            first_transaction_id: default_first_transaction_id(),
            default_overall_limit: None,
        }
    }
}

/// Highest accepted `first_transaction_id`, leaving room for numbering
pub const MAX_FIRST_TRANSACTION_ID: u64 = u64::MAX / 2;

impl Settings {
    /// Load settings from the resolved settings file, or defaults if it doesn't exist
    pub fn load_or_create(paths: &AppPaths) -> Result<Self, FinanceError> {
        Self::load_from(&paths.settings_file())
    }

    /// Load settings from an explicit file, or defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self, FinanceError> {
        if !path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FinanceError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AppPaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check values that would otherwise fail later, mid-session
    pub fn validate(&self) -> Result<(), FinanceError> {
        if self.first_transaction_id == 0 {
            return Err(FinanceError::Config(
                "first_transaction_id must be at least 1".into(),
            ));
        }
        if self.first_transaction_id > MAX_FIRST_TRANSACTION_ID {
            return Err(FinanceError::Config(format!(
                "first_transaction_id must be at most {}",
                MAX_FIRST_TRANSACTION_ID
            )));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(FinanceError::Config(format!(
                "date_format '{}' is not a valid strftime format",
                self.date_format
            )));
        }
        if let Some(limit) = self.default_overall_limit {
            if limit.is_negative() {
                return Err(FinanceError::Config(
                    "default_overall_limit cannot be negative".into(),
                ));
            }
            if !limit.is_within_limit() {
                return Err(FinanceError::Config(format!(
                    "default_overall_limit cannot exceed {}",
                    Money::MAX
                )));
            }
        }
        Ok(())
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}
