//! Savings goal model
//!
//! A named target amount that the user pays into over time. Goals sit next
//! to the ledger; funding a goal does not create a transaction.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoal {
    name: String,
    target: Money,
    saved: Money,
}

impl SavingsGoal {
    pub fn new(name: impl AsRef<str>, target: Money) -> Result<Self, GoalValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(GoalValidationError::EmptyName);
        }
        if !target.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget);
        }
        Ok(Self {
            name: name.to_string(),
            target,
            saved: Money::zero(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> Money {
        self.target
    }

    pub fn saved(&self) -> Money {
        self.saved
    }

    /// Pay into the goal. Saving past the target is allowed.
    pub fn add_funds(&mut self, amount: Money) -> Result<(), GoalValidationError> {
        if !amount.is_positive() {
            return Err(GoalValidationError::NonPositiveContribution);
        }
        self.saved += amount;
        Ok(())
    }

    pub fn progress_percentage(&self) -> f64 {
        self.saved.percentage_of(self.target)
    }

    /// Amount still needed, never below zero
    pub fn remaining(&self) -> Money {
        let left = self.target - self.saved;
        if left.is_negative() {
            Money::zero()
        } else {
            left
        }
    }

    pub fn is_reached(&self) -> bool {
        self.saved >= self.target
    }
}

impl fmt::Display for SavingsGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {} ({:.1}%)",
            self.name,
            self.saved,
            self.target,
            self.progress_percentage()
        )
    }
}

/// Validation errors for savings goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NonPositiveTarget,
    NonPositiveContribution,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NonPositiveTarget => write!(f, "Goal target must be positive"),
            Self::NonPositiveContribution => write!(f, "Contribution must be positive"),
        }
    }
}

impl std::error::Error for GoalValidationError {}
