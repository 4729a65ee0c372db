//! Budget model
//!
//! A budget pairs a category with a spending limit. The tracker stores
//! limits keyed by category; this type is the validated way to build one
//! from user input.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{Category, CategoryValidationError};
use super::money::Money;

/// A spending limit for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    category: Category,
    limit: Money,
}

impl Budget {
    /// Build a budget, rejecting negative limits
    pub fn new(category: Category, limit: Money) -> Result<Self, BudgetValidationError> {
        if limit.is_negative() {
            return Err(BudgetValidationError::NegativeLimit);
        }
        Ok(Self { category, limit })
    }

    /// Wrap a limit already stored by the tracker, whatever its sign
    pub(crate) fn from_stored(category: Category, limit: Money) -> Self {
        Self { category, limit }
    }

    /// Build a budget from a raw category name
    pub fn for_name(category: &str, limit: Money) -> Result<Self, BudgetValidationError> {
        Self::new(Category::new(category)?, limit)
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn limit(&self) -> Money {
        self.limit
    }

    pub fn into_parts(self) -> (Category, Money) {
        (self.category, self.limit)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.limit)
    }
}

/// Where a category stands against its limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetStatus {
    pub category: Category,
    /// Stored limit, zero when none was set
    pub limit: Money,
    /// Total expense recorded against the category
    pub spent: Money,
    /// `limit - spent`, negative when overspent
    pub remaining: Money,
    pub over_limit: bool,
}

impl BudgetStatus {
    /// Whether a limit was ever set for this row
    pub fn has_limit(&self) -> bool {
        self.limit.is_positive()
    }

    /// Spent as a share of the limit; zero when unbudgeted
    pub fn used_percentage(&self) -> f64 {
        self.spent.percentage_of(self.limit)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeLimit,
    Category(CategoryValidationError),
}

impl From<CategoryValidationError> for BudgetValidationError {
    fn from(err: CategoryValidationError) -> Self {
        Self::Category(err)
    }
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeLimit => write!(f, "Budget limit cannot be negative"),
            Self::Category(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
