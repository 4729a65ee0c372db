//! Transaction identifiers and the generator that hands them out
//!
//! Ids are small sequential integers so the shell can refer to them by
//! typing `remove 7`. Each ledger owns its own generator; there is no
//! process-wide counter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a single transaction within one ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(u64);

impl TransactionId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for TransactionId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        Ok(Self(s.parse()?))
    }
}

impl From<u64> for TransactionId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Monotonic id source
///
/// Every call to [`IdGenerator::next_id`] returns a value strictly greater
/// than the previous one. Once `u64::MAX` has been handed out the generator
/// is exhausted and yields `None`. Tests construct it with a known starting
/// point.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: Option<u64>,
}

impl IdGenerator {
    /// A generator whose first id is `#1`
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: Some(first) }
    }

    /// Hand out the next id
    pub fn next_id(&mut self) -> Option<TransactionId> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(TransactionId(id))
    }

    /// The id the next call will return, without consuming it
    pub fn peek(&self) -> Option<TransactionId> {
        self.next.map(TransactionId)
    }

    /// Make sure `id` is never handed out again
    pub fn advance_past(&mut self, id: TransactionId) {
        if let Some(next) = self.next {
            if id.0 >= next {
                self.next = id.0.checked_add(1);
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
