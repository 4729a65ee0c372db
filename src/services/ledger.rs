//! Transaction ledger
//!
//! Owns the insertion-ordered list of transactions for one session together
//! with the undo buffer of deleted transactions. Every query returns an owned
//! copy, so callers can never reach the ledger's internal state through a
//! returned value.

use std::collections::{BTreeMap, VecDeque};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    Category, IdGenerator, Money, Transaction, TransactionId, TransactionKind,
};

/// Ordered transaction store with delete/undo support
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    /// Most recent deletion at the back
    deleted: VecDeque<Transaction>,
    /// Maximum number of deletions remembered; `None` keeps them all
    undo_depth: Option<usize>,
    ids: IdGenerator,
}

impl Ledger {
    /// An empty ledger with an unbounded undo buffer and ids starting at `#1`
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty ledger drawing ids from the given generator
    pub fn with_id_generator(ids: IdGenerator) -> Self {
        Self {
            ids,
            ..Self::default()
        }
    }

    /// Limit how many deletions can be undone. The oldest is forgotten first.
    pub fn with_undo_depth(mut self, depth: usize) -> Self {
        self.undo_depth = Some(depth);
        self.trim_undo_buffer();
        self
    }

    /// Validate and append a new transaction, returning its id
    pub fn record(
        &mut self,
        date: NaiveDate,
        description: &str,
        amount: Money,
        kind: TransactionKind,
        category: Category,
    ) -> FinanceResult<TransactionId> {
        let id = self.ids.peek().ok_or_else(|| {
            FinanceError::Validation("No transaction ids left in this ledger".into())
        })?;
        let txn = Transaction::new(id, date, description, amount, kind, category)?;
        self.add(txn);
        Ok(id)
    }

    /// Append a transaction at the end of the sequence
    ///
    /// The id is taken as given; keeping ids unique among transactions added
    /// this way is up to the caller. [`Ledger::record`] never reuses an id
    /// seen here.
    pub fn add(&mut self, transaction: Transaction) {
        self.ids.advance_past(transaction.id());
        debug!(
            id = %transaction.id(),
            kind = %transaction.kind(),
            amount = %transaction.amount(),
            "transaction added"
        );
        self.transactions.push(transaction);
    }

    /// Remove a transaction by id and remember it for undo
    pub fn remove(&mut self, id: TransactionId) -> FinanceResult<Transaction> {
        let Some(index) = self.transactions.iter().position(|t| t.id() == id) else {
            warn!(%id, "remove requested for unknown transaction");
            return Err(FinanceError::transaction_not_found(id.to_string()));
        };

        let removed = self.transactions.remove(index);
        self.deleted.push_back(removed.clone());
        self.trim_undo_buffer();
        debug!(%id, undo_len = self.deleted.len(), "transaction removed");
        Ok(removed)
    }

    /// Restore the most recently deleted transaction
    ///
    /// The transaction is appended at the end; its original position is not
    /// restored.
    pub fn undo_last_deletion(&mut self) -> FinanceResult<Transaction> {
        let Some(restored) = self.deleted.pop_back() else {
            warn!("undo requested with empty undo buffer");
            return Err(FinanceError::NothingToUndo);
        };

        debug!(id = %restored.id(), "deletion undone");
        self.transactions.push(restored.clone());
        Ok(restored)
    }

    /// Number of deletions that can currently be undone
    pub fn undo_len(&self) -> usize {
        self.deleted.len()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: TransactionId) -> Option<Transaction> {
        self.transactions.iter().find(|t| t.id() == id).cloned()
    }

    /// Snapshot of every transaction in insertion order
    pub fn all(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    pub fn by_kind(&self, kind: TransactionKind) -> Vec<Transaction> {
        self.by_predicate(|t| t.kind() == kind)
    }

    /// Transactions in the named category (case-insensitive)
    pub fn by_category(&self, name: &str) -> Vec<Transaction> {
        self.by_predicate(|t| t.category().matches(name))
    }

    /// Transactions dated within `start..=end`
    pub fn by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Transaction> {
        self.by_predicate(|t| t.is_within(start, end))
    }

    pub fn by_predicate<F>(&self, predicate: F) -> Vec<Transaction>
    where
        F: Fn(&Transaction) -> bool,
    {
        self.transactions
            .iter()
            .filter(|t| predicate(t))
            .cloned()
            .collect()
    }

    /// Income minus expenses over all current transactions
    pub fn balance(&self) -> Money {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }

    pub fn total_income(&self) -> Money {
        self.total_for(TransactionKind::Income)
    }

    pub fn total_expenses(&self) -> Money {
        self.total_for(TransactionKind::Expense)
    }

    fn total_for(&self, kind: TransactionKind) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.kind() == kind)
            .map(Transaction::amount)
            .sum()
    }

    /// Summed amounts per category for one kind
    ///
    /// Categories with no transaction of that kind are absent from the map.
    pub fn sum_by_category(&self, kind: TransactionKind) -> BTreeMap<Category, Money> {
        sum_by_category(&self.transactions, kind)
    }

    /// Distinct categories referenced by current transactions
    pub fn categories(&self) -> Vec<Category> {
        let mut seen: Vec<Category> = Vec::new();
        for txn in &self.transactions {
            if !seen.contains(txn.category()) {
                seen.push(txn.category().clone());
            }
        }
        seen
    }

    fn trim_undo_buffer(&mut self) {
        if let Some(depth) = self.undo_depth {
            while self.deleted.len() > depth {
                self.deleted.pop_front();
            }
        }
    }
}

/// Per-category totals over any slice of transactions
pub fn sum_by_category(
    transactions: &[Transaction],
    kind: TransactionKind,
) -> BTreeMap<Category, Money> {
    let mut totals = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.kind() == kind) {
        *totals.entry(txn.category().clone()).or_insert_with(Money::zero) += txn.amount();
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    fn cat(name: &str) -> Category {
        Category::new(name).unwrap()
    }

    fn record(ledger: &mut Ledger, d: u32, units: i64, kind: TransactionKind, category: &str) -> TransactionId {
        ledger
            .record(day(d), "entry", Money::from_units(units), kind, cat(category))
            .unwrap()
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = Ledger::new();
        assert!(ledger.all().is_empty());
        assert!(ledger.is_empty());
        assert_eq!(ledger.balance(), Money::zero());
        assert_eq!(ledger.total_income(), Money::zero());
        assert!(ledger.sum_by_category(TransactionKind::Expense).is_empty());
    }

    #[test]
    fn test_balance_and_totals() {
        let mut ledger = Ledger::new();
        record(&mut ledger, 1, 100, TransactionKind::Income, "Salary");
        record(&mut ledger, 2, 40, TransactionKind::Expense, "Food");

        assert_eq!(ledger.balance(), Money::from_units(60));
        assert_eq!(ledger.total_income(), Money::from_units(100));
        assert_eq!(ledger.total_expenses(), Money::from_units(40));
    }

    #[test]
    fn test_ids_are_sequential_from_generator() {
        let mut ledger = Ledger::with_id_generator(IdGenerator::starting_at(10));
        let a = record(&mut ledger, 1, 5, TransactionKind::Expense, "Food");
        let b = record(&mut ledger, 1, 5, TransactionKind::Expense, "Food");
        assert_eq!(a, TransactionId::new(10));
        assert_eq!(b, TransactionId::new(11));
    }

    #[test]
    fn test_record_skips_ids_of_added_transactions() {
        let mut ledger = Ledger::new();
        let imported = Transaction::new(
            TransactionId::new(5),
            day(2),
            "imported",
            Money::from_units(20),
            TransactionKind::Income,
            cat("Gift"),
        )
        .unwrap();
        ledger.add(imported);

        let id = record(&mut ledger, 3, 5, TransactionKind::Expense, "Food");
        assert_eq!(id, TransactionId::new(6));

        // restoring an old id does not move numbering backwards
        ledger.remove(TransactionId::new(5)).unwrap();
        ledger.undo_last_deletion().unwrap();
        let id = record(&mut ledger, 3, 5, TransactionKind::Expense, "Food");
        assert_eq!(id, TransactionId::new(7));
    }

    #[test]
    fn test_exhausted_ids_are_an_error() {
        let mut ledger = Ledger::with_id_generator(IdGenerator::starting_at(u64::MAX));
        let last = record(&mut ledger, 1, 5, TransactionKind::Expense, "Food");
        assert_eq!(last, TransactionId::new(u64::MAX));

        let err = ledger
            .record(day(1), "more", Money::from_units(5), TransactionKind::Expense, cat("Food"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_invalid_record_does_not_consume_id() {
        let mut ledger = Ledger::new();
        let err = ledger
            .record(day(1), "  ", Money::from_units(5), TransactionKind::Expense, cat("Food"))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(ledger.is_empty());

        let id = record(&mut ledger, 1, 5, TransactionKind::Expense, "Food");
        assert_eq!(id, TransactionId::new(1));
    }

    #[test]
    fn test_remove_and_undo() {
        let mut ledger = Ledger::new();
        let first = record(&mut ledger, 1, 10, TransactionKind::Expense, "Food");
        let second = record(&mut ledger, 2, 20, TransactionKind::Expense, "Rent");

        let removed = ledger.remove(first).unwrap();
        assert_eq!(removed.id(), first);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.undo_len(), 1);

        let restored = ledger.undo_last_deletion().unwrap();
        assert_eq!(restored.id(), first);

        // appended at the end, not reinserted at its old position
        let order: Vec<_> = ledger.all().iter().map(Transaction::id).collect();
        assert_eq!(order, vec![second, first]);

        let before = ledger.all();
        assert!(matches!(
            ledger.undo_last_deletion(),
            Err(FinanceError::NothingToUndo)
        ));
        assert_eq!(ledger.all(), before);
    }

    #[test]
    fn test_undo_is_lifo() {
        let mut ledger = Ledger::new();
        let a = record(&mut ledger, 1, 1, TransactionKind::Expense, "Food");
        let b = record(&mut ledger, 1, 2, TransactionKind::Expense, "Food");
        ledger.remove(a).unwrap();
        ledger.remove(b).unwrap();

        assert_eq!(ledger.undo_last_deletion().unwrap().id(), b);
        assert_eq!(ledger.undo_last_deletion().unwrap().id(), a);
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut ledger = Ledger::new();
        record(&mut ledger, 1, 10, TransactionKind::Income, "Salary");

        let err = ledger.remove(TransactionId::new(99)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.undo_len(), 0);
    }

    #[test]
    fn test_bounded_undo_forgets_oldest() {
        let mut ledger = Ledger::new().with_undo_depth(1);
        let a = record(&mut ledger, 1, 1, TransactionKind::Expense, "Food");
        let b = record(&mut ledger, 1, 2, TransactionKind::Expense, "Food");
        ledger.remove(a).unwrap();
        ledger.remove(b).unwrap();

        assert_eq!(ledger.undo_len(), 1);
        assert_eq!(ledger.undo_last_deletion().unwrap().id(), b);
        assert!(ledger.undo_last_deletion().is_err());
    }

    #[test]
    fn test_all_returns_copy() {
        let mut ledger = Ledger::new();
        record(&mut ledger, 1, 100, TransactionKind::Income, "Salary");

        let mut snapshot = ledger.all();
        snapshot.clear();

        assert_eq!(ledger.all().len(), 1);
        assert_eq!(ledger.balance(), Money::from_units(100));
    }

    #[test]
    fn test_filters_preserve_order() {
        let mut ledger = Ledger::new();
        let a = record(&mut ledger, 1, 20, TransactionKind::Expense, "Food");
        let _ = record(&mut ledger, 5, 500, TransactionKind::Income, "Salary");
        let c = record(&mut ledger, 9, 30, TransactionKind::Expense, "food");
        let d = record(&mut ledger, 30, 10, TransactionKind::Expense, "Transport");

        let ids = |txns: Vec<Transaction>| txns.iter().map(Transaction::id).collect::<Vec<_>>();

        assert_eq!(ids(ledger.by_kind(TransactionKind::Expense)), vec![a, c, d]);
        assert_eq!(ids(ledger.by_category("FOOD")), vec![a, c]);
        assert_eq!(ids(ledger.by_date_range(day(1), day(9))).len(), 3);
        assert_eq!(ids(ledger.by_date_range(day(9), day(30))), vec![c, d]);
        assert_eq!(
            ids(ledger.by_predicate(|t| t.amount() < Money::from_units(25))),
            vec![a, d]
        );
    }

    #[test]
    fn test_sum_by_category() {
        let mut ledger = Ledger::new();
        record(&mut ledger, 1, 20, TransactionKind::Expense, "Food");
        record(&mut ledger, 2, 30, TransactionKind::Expense, "Food");
        record(&mut ledger, 3, 10, TransactionKind::Expense, "Transport");
        record(&mut ledger, 4, 900, TransactionKind::Income, "Salary");

        let sums = ledger.sum_by_category(TransactionKind::Expense);
        assert_eq!(sums.len(), 2);
        assert_eq!(sums.get(&cat("Food")), Some(&Money::from_units(50)));
        assert_eq!(sums.get(&cat("Transport")), Some(&Money::from_units(10)));
        assert_eq!(sums.get(&cat("Salary")), None);

        let income = ledger.sum_by_category(TransactionKind::Income);
        assert_eq!(income.get(&cat("salary")), Some(&Money::from_units(900)));
    }

    #[test]
    fn test_queries_are_idempotent() {
        let mut ledger = Ledger::new();
        record(&mut ledger, 1, 20, TransactionKind::Expense, "Food");
        record(&mut ledger, 2, 70, TransactionKind::Income, "Gift");

        assert_eq!(ledger.all(), ledger.all());
        assert_eq!(ledger.balance(), ledger.balance());
        assert_eq!(
            ledger.sum_by_category(TransactionKind::Expense),
            ledger.sum_by_category(TransactionKind::Expense)
        );
    }

    #[test]
    fn test_categories_deduplicated() {
        let mut ledger = Ledger::new();
        record(&mut ledger, 1, 20, TransactionKind::Expense, "Food");
        record(&mut ledger, 2, 20, TransactionKind::Expense, "FOOD");
        record(&mut ledger, 3, 20, TransactionKind::Income, "Salary");

        let names: Vec<_> = ledger.categories().iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["Food", "Salary"]);
    }
}
