//! Custom error types for the finance tracker
//!
//! This module defines the error hierarchy for the crate using thiserror.
//! Model constructors report their own validation enums; those convert into
//! [`FinanceError::Validation`] when they cross into the service layer.

use thiserror::Error;

use crate::models::{
    BudgetValidationError, CategoryValidationError, GoalValidationError,
    TransactionValidationError,
};

/// The main error type for finance tracker operations
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Undo requested with nothing deleted
    #[error("Nothing to undo")]
    NothingToUndo,

    /// Malformed user input (shell commands, dates, amounts)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl FinanceError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for savings goals
    pub fn goal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Savings goal",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NothingToUndo)
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<TransactionValidationError> for FinanceError {
    fn from(err: TransactionValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<CategoryValidationError> for FinanceError {
    fn from(err: CategoryValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<BudgetValidationError> for FinanceError {
    fn from(err: BudgetValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<GoalValidationError> for FinanceError {
    fn from(err: GoalValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for finance tracker operations
pub type FinanceResult<T> = Result<T, FinanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinanceError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = FinanceError::transaction_not_found("#42");
        assert_eq!(err.to_string(), "Transaction not found: #42");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_nothing_to_undo_counts_as_not_found() {
        let err = FinanceError::NothingToUndo;
        assert_eq!(err.to_string(), "Nothing to undo");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validation_conversion() {
        let err: FinanceError = TransactionValidationError::NonPositiveAmount.into();
        assert!(err.is_validation());
        assert!(err.to_string().starts_with("Validation error:"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FinanceError = io_err.into();
        assert!(matches!(err, FinanceError::Io(_)));
    }
}
