//! Category model
//!
//! A category is just a trimmed name. Two categories that differ only in
//! letter case are the same category: equality, ordering and hashing all go
//! through the lowercased name, while the original spelling is kept for
//! display.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Longest accepted category name, in characters
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// A spending or income category
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category {
    name: String,
    key: String,
}

impl Category {
    /// Create a category, trimming surrounding whitespace
    pub fn new(name: impl AsRef<str>) -> Result<Self, CategoryValidationError> {
        let name = name.as_ref().trim();

        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        let len = name.chars().count();
        if len > MAX_CATEGORY_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(len));
        }

        Ok(Self {
            name: name.to_string(),
            key: name.to_lowercase(),
        })
    }

    /// The name as first entered
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `name` refers to this category (case-insensitive)
    pub fn matches(&self, name: &str) -> bool {
        self.key == name.trim().to_lowercase()
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.name)
    }
}

impl TryFrom<String> for Category {
    type Error = CategoryValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Category {
    type Error = CategoryValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.name
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} chars, max {})",
                len, MAX_CATEGORY_NAME_LEN
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
