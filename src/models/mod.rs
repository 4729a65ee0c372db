//! Core data models for the finance tracker
//!
//! Value types for the bookkeeping domain: money, transactions, categories,
//! budgets and savings goals. Everything here is validated at construction
//! and holds no references to the services that own it.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod savings_goal;
pub mod transaction;

pub use budget::{Budget, BudgetStatus, BudgetValidationError};
pub use category::{Category, CategoryValidationError};
pub use ids::{IdGenerator, TransactionId};
pub use money::{Money, MoneyParseError};
pub use savings_goal::{GoalValidationError, SavingsGoal};
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};
