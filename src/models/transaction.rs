//! Transaction model
//!
//! A transaction is one income or expense event. The amount is always
//! positive; the [`TransactionKind`] decides which way it moves the balance.
//! Transactions are validated once at construction and never change after.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::{Category, CategoryValidationError};
use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// +1 for income, -1 for expense
    pub const fn sign(&self) -> i64 {
        match self {
            Self::Income => 1,
            Self::Expense => -1,
        }
    }

    /// Apply this kind's sign to a positive amount
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            Self::Income => amount,
            Self::Expense => -amount,
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Income, Self::Expense]
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        };
        f.pad(label)
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(TransactionValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// A single recorded income or expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    date: NaiveDate,
    description: String,
    amount: Money,
    kind: TransactionKind,
    category: Category,
}

impl Transaction {
    /// Validate the fields and build a transaction
    ///
    /// The description is trimmed. The amount must be strictly positive and
    /// no larger than [`Money::MAX`].
    pub fn new(
        id: TransactionId,
        date: NaiveDate,
        description: impl AsRef<str>,
        amount: Money,
        kind: TransactionKind,
        category: Category,
    ) -> Result<Self, TransactionValidationError> {
        let description = description.as_ref().trim();
        if description.is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }

        if !amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount);
        }
        if !amount.is_within_limit() {
            return Err(TransactionValidationError::AmountTooLarge);
        }

        Ok(Self {
            id,
            date,
            description: description.to_string(),
            amount,
            kind,
            category,
        })
    }

    /// Like [`Transaction::new`], taking the category as a raw name
    pub fn with_category_name(
        id: TransactionId,
        date: NaiveDate,
        description: impl AsRef<str>,
        amount: Money,
        kind: TransactionKind,
        category: &str,
    ) -> Result<Self, TransactionValidationError> {
        let category = Category::new(category)?;
        Self::new(id, date, description, amount, kind, category)
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The unsigned amount (always positive)
    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Contribution to the balance: positive for income, negative for expense
    pub fn signed_amount(&self) -> Money {
        self.kind.signed(self.amount)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Whether the date falls in `start..=end`
    pub fn is_within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.date >= start && self.date <= end
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}: {} - {} ({})",
            self.date.format("%Y-%m-%d"),
            self.id,
            self.kind,
            self.amount,
            self.description,
            self.category
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyDescription,
    NonPositiveAmount,
    AmountTooLarge,
    UnknownKind(String),
    Category(CategoryValidationError),
}

impl From<CategoryValidationError> for TransactionValidationError {
    fn from(err: CategoryValidationError) -> Self {
        Self::Category(err)
    }
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Transaction description cannot be empty"),
            Self::NonPositiveAmount => write!(
                f,
                "Transaction amount must be positive; use income/expense to set direction"
            ),
            Self::AmountTooLarge => write!(f, "Transaction amount exceeds {}", Money::MAX),
            Self::UnknownKind(kind) => {
                write!(f, "Unknown transaction type '{}' (expected income or expense)", kind)
            }
            Self::Category(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
