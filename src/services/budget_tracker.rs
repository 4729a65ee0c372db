//! Budget tracker
//!
//! Holds one overall spending limit and a limit per category, and works out
//! what is left against expense totals supplied by the caller (normally
//! `Ledger::sum_by_category(TransactionKind::Expense)`).
//!
//! The setters store whatever amount they are given. Rejecting negative
//! limits happens when input is turned into a [`Budget`], before it reaches
//! the tracker.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{Budget, BudgetStatus, Category, Money};

#[derive(Debug, Clone, Default)]
pub struct BudgetTracker {
    overall_limit: Money,
    category_limits: BTreeMap<Category, Money>,
}

impl BudgetTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the overall limit
    pub fn set_overall_limit(&mut self, amount: Money) {
        debug!(%amount, "overall limit set");
        self.overall_limit = amount;
    }

    pub fn overall_limit(&self) -> Money {
        self.overall_limit
    }

    /// Replace (or create) the limit for a category
    ///
    /// Category names match case-insensitively, so setting `food` after
    /// `Food` replaces the value while keeping the first spelling.
    pub fn set_category_limit(&mut self, category: Category, amount: Money) {
        debug!(%category, %amount, "category limit set");
        match self.category_limits.get_mut(&category) {
            Some(limit) => *limit = amount,
            None => {
                self.category_limits.insert(category, amount);
            }
        }
    }

    /// Store a validated budget
    pub fn apply(&mut self, budget: Budget) {
        let (category, limit) = budget.into_parts();
        self.set_category_limit(category, limit);
    }

    /// The stored limit, or zero when none was set
    pub fn category_limit(&self, category: &Category) -> Money {
        self.category_limits
            .get(category)
            .copied()
            .unwrap_or_default()
    }

    /// Snapshot of every category limit
    pub fn all_category_limits(&self) -> BTreeMap<Category, Money> {
        self.category_limits.clone()
    }

    /// Budgets as value objects, sorted by category
    ///
    /// Mirrors [`BudgetTracker::all_category_limits`] exactly, including any
    /// negative limit stored through the unvalidated setters.
    pub fn budgets(&self) -> Vec<Budget> {
        self.category_limits
            .iter()
            .map(|(category, limit)| Budget::from_stored(category.clone(), *limit))
            .collect()
    }

    /// Limit minus expense for every budgeted or spent-in category
    ///
    /// Categories that were spent in but never budgeted start from a zero
    /// limit, so any spending there shows up as a negative remainder.
    pub fn remaining_by_category(
        &self,
        expenses_by_category: &BTreeMap<Category, Money>,
    ) -> BTreeMap<Category, Money> {
        let mut remaining = self.category_limits.clone();
        for (category, expense) in expenses_by_category {
            *remaining.entry(category.clone()).or_insert_with(Money::zero) -= *expense;
        }
        remaining
    }

    /// Overall limit minus total expenses; negative when overspent
    pub fn remaining_overall(&self, total_expenses: Money) -> Money {
        self.overall_limit - total_expenses
    }

    /// True only when a positive limit exists and `expense` exceeds it
    pub fn is_over_limit(&self, category: &Category, expense: Money) -> bool {
        let limit = self.category_limit(category);
        limit.is_positive() && expense > limit
    }

    /// Full per-category status rows for the same key set as
    /// [`BudgetTracker::remaining_by_category`]
    pub fn status(&self, expenses_by_category: &BTreeMap<Category, Money>) -> Vec<BudgetStatus> {
        self.remaining_by_category(expenses_by_category)
            .into_iter()
            .map(|(category, remaining)| {
                let limit = self.category_limit(&category);
                let spent = expenses_by_category
                    .get(&category)
                    .copied()
                    .unwrap_or_default();
                let over_limit = self.is_over_limit(&category, spent);
                BudgetStatus {
                    category,
                    limit,
                    spent,
                    remaining,
                    over_limit,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(name: &str) -> Category {
        Category::new(name).unwrap()
    }

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    #[test]
    fn test_defaults() {
        let tracker = BudgetTracker::new();
        assert_eq!(tracker.overall_limit(), Money::zero());
        assert_eq!(tracker.category_limit(&cat("Food")), Money::zero());
        assert!(tracker.all_category_limits().is_empty());
    }

    #[test]
    fn test_set_replaces_case_insensitively() {
        let mut tracker = BudgetTracker::new();
        tracker.set_category_limit(cat("Food"), units(100));
        tracker.set_category_limit(cat("food"), units(150));

        let limits = tracker.all_category_limits();
        assert_eq!(limits.len(), 1);
        let (key, value) = limits.iter().next().unwrap();
        assert_eq!(key.name(), "Food");
        assert_eq!(*value, units(150));
        assert_eq!(tracker.category_limit(&cat("FOOD")), units(150));
    }

    #[test]
    fn test_overall_limit() {
        let mut tracker = BudgetTracker::new();
        tracker.set_overall_limit(units(1000));
        tracker.set_overall_limit(units(800));
        assert_eq!(tracker.overall_limit(), units(800));
        assert_eq!(tracker.remaining_overall(units(300)), units(500));
        assert_eq!(tracker.remaining_overall(units(900)), units(-100));
    }

    #[test]
    fn test_setters_do_not_validate() {
        let mut tracker = BudgetTracker::new();
        tracker.set_overall_limit(units(-5));
        tracker.set_category_limit(cat("Odd"), units(-1));
        assert_eq!(tracker.overall_limit(), units(-5));
        assert_eq!(tracker.category_limit(&cat("Odd")), units(-1));

        tracker.set_category_limit(cat("Food"), units(30));
        let budgets = tracker.budgets();
        assert_eq!(budgets.len(), tracker.all_category_limits().len());
        assert_eq!(budgets[1].category(), &cat("Odd"));
        assert_eq!(budgets[1].limit(), units(-1));
    }

    #[test]
    fn test_remaining_by_category_includes_unbudgeted() {
        let mut tracker = BudgetTracker::new();
        tracker.set_category_limit(cat("Food"), units(100));

        let mut expenses = BTreeMap::new();
        expenses.insert(cat("Food"), units(40));
        expenses.insert(cat("Transport"), units(15));

        let remaining = tracker.remaining_by_category(&expenses);
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[&cat("Food")], units(60));
        assert_eq!(remaining[&cat("Transport")], units(-15));
    }

    #[test]
    fn test_remaining_keeps_budgeted_without_spending() {
        let mut tracker = BudgetTracker::new();
        tracker.set_category_limit(cat("Rent"), units(1400));

        let remaining = tracker.remaining_by_category(&BTreeMap::new());
        assert_eq!(remaining[&cat("Rent")], units(1400));
    }

    #[test]
    fn test_is_over_limit() {
        let mut tracker = BudgetTracker::new();
        assert!(!tracker.is_over_limit(&cat("Food"), units(150)));

        tracker.set_category_limit(cat("Food"), units(100));
        assert!(tracker.is_over_limit(&cat("Food"), units(150)));
        assert!(!tracker.is_over_limit(&cat("Food"), units(100)));

        tracker.set_category_limit(cat("Food"), Money::zero());
        assert!(!tracker.is_over_limit(&cat("Food"), units(150)));
    }

    #[test]
    fn test_apply_budget() {
        let mut tracker = BudgetTracker::new();
        tracker.apply(Budget::for_name("Dining Out", units(150)).unwrap());
        assert_eq!(tracker.category_limit(&cat("dining out")), units(150));
        assert_eq!(tracker.budgets().len(), 1);
    }

    #[test]
    fn test_status_rows() {
        let mut tracker = BudgetTracker::new();
        tracker.set_category_limit(cat("Food"), units(100));
        tracker.set_category_limit(cat("Rent"), units(1000));

        let mut expenses = BTreeMap::new();
        expenses.insert(cat("Food"), units(120));
        expenses.insert(cat("Fun"), units(30));

        let rows = tracker.status(&expenses);
        let names: Vec<_> = rows.iter().map(|r| r.category.name()).collect();
        assert_eq!(names, vec!["Food", "Fun", "Rent"]);

        assert!(rows[0].over_limit);
        assert_eq!(rows[0].remaining, units(-20));
        assert!(!rows[1].over_limit);
        assert!(!rows[1].has_limit());
        assert_eq!(rows[1].remaining, units(-30));
        assert_eq!(rows[2].spent, Money::zero());
    }
}
