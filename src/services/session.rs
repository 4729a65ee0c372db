//! Per-user session
//!
//! A session pairs one [`Ledger`] with one [`BudgetTracker`] for a single
//! owner, plus the owner's savings goals. Nothing is shared between
//! sessions.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    Budget, BudgetStatus, Category, IdGenerator, Money, SavingsGoal, TransactionId,
    TransactionKind,
};

use super::budget_tracker::BudgetTracker;
use super::ledger::Ledger;

#[derive(Debug, Clone)]
pub struct Session {
    owner: String,
    pub ledger: Ledger,
    pub budgets: BudgetTracker,
    goals: Vec<SavingsGoal>,
}

impl Session {
    /// A session with default settings
    pub fn new(owner: impl Into<String>) -> Self {
        Self::with_settings(owner, &Settings::default())
    }

    /// A session shaped by the user's settings
    pub fn with_settings(owner: impl Into<String>, settings: &Settings) -> Self {
        let owner = owner.into();
        let mut ledger =
            Ledger::with_id_generator(IdGenerator::starting_at(settings.first_transaction_id));
        if let Some(depth) = settings.undo_depth {
            ledger = ledger.with_undo_depth(depth);
        }

        let mut budgets = BudgetTracker::new();
        if let Some(limit) = settings.default_overall_limit {
            budgets.set_overall_limit(limit);
        }

        info!(%owner, "session started");
        Self {
            owner,
            ledger,
            budgets,
            goals: Vec::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Validate and record a transaction, creating its category on first use
    pub fn record(
        &mut self,
        date: NaiveDate,
        description: &str,
        amount: Money,
        kind: TransactionKind,
        category: &str,
    ) -> FinanceResult<TransactionId> {
        let category = Category::new(category)?;
        self.ledger.record(date, description, amount, kind, category)
    }

    /// Validate and store a category limit
    pub fn set_budget(&mut self, category: &str, limit: Money) -> FinanceResult<()> {
        let budget = Budget::for_name(category, limit)?;
        self.budgets.apply(budget);
        Ok(())
    }

    /// Validate and store the overall limit
    pub fn set_overall_budget(&mut self, limit: Money) -> FinanceResult<()> {
        if limit.is_negative() {
            return Err(FinanceError::Validation(
                "Budget limit cannot be negative".into(),
            ));
        }
        self.budgets.set_overall_limit(limit);
        Ok(())
    }

    /// Every category known to the session, sorted and without duplicates
    pub fn categories(&self) -> Vec<Category> {
        let known: BTreeSet<Category> = self
            .budgets
            .all_category_limits()
            .into_keys()
            .chain(self.ledger.categories())
            .collect();
        known.into_iter().collect()
    }

    /// Budget standing per category against current expenses
    pub fn budget_status(&self) -> Vec<BudgetStatus> {
        let expenses = self.ledger.sum_by_category(TransactionKind::Expense);
        self.budgets.status(&expenses)
    }

    /// What is left of the overall limit
    pub fn remaining_overall(&self) -> Money {
        self.budgets.remaining_overall(self.ledger.total_expenses())
    }

    /// Add a savings goal, replacing any goal with the same name
    pub fn add_goal(&mut self, goal: SavingsGoal) {
        match self.goal_index(goal.name()) {
            Some(index) => self.goals[index] = goal,
            None => self.goals.push(goal),
        }
    }

    /// Pay into a named goal
    pub fn contribute(&mut self, goal_name: &str, amount: Money) -> FinanceResult<&SavingsGoal> {
        let index = self
            .goal_index(goal_name)
            .ok_or_else(|| FinanceError::goal_not_found(goal_name.trim()))?;

        let goal = &mut self.goals[index];
        goal.add_funds(amount)?;
        debug!(goal = goal.name(), saved = %goal.saved(), "goal funded");
        Ok(&self.goals[index])
    }

    pub fn goals(&self) -> &[SavingsGoal] {
        &self.goals
    }

    fn goal_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_lowercase();
        self.goals
            .iter()
            .position(|g| g.name().to_lowercase() == wanted)
    }
}
