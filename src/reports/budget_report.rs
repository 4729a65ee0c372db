//! Budget report
//!
//! Overall limit against total spending, followed by one row per budgeted
//! or spent-in category.

use crate::models::{BudgetStatus, Money};
use crate::services::Session;

#[derive(Debug, Clone)]
pub struct BudgetReport {
    pub overall_limit: Money,
    pub total_expenses: Money,
    pub remaining_overall: Money,
    pub rows: Vec<BudgetStatus>,
}

impl BudgetReport {
    pub fn generate(session: &Session) -> Self {
        Self {
            overall_limit: session.budgets.overall_limit(),
            total_expenses: session.ledger.total_expenses(),
            remaining_overall: session.remaining_overall(),
            rows: session.budget_status(),
        }
    }

    /// Categories whose spending exceeds a set limit
    pub fn over_limit(&self) -> impl Iterator<Item = &BudgetStatus> {
        self.rows.iter().filter(|r| r.over_limit)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Budget Report\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Overall Limit:  {:>12}\n", self.overall_limit));
        output.push_str(&format!("Total Expenses: {:>12}\n", self.total_expenses));
        output.push_str(&format!("Remaining:      {:>12}\n", self.remaining_overall));

        if self.rows.is_empty() {
            output.push_str("\nNo category budgets set.\n");
            return output;
        }

        output.push('\n');
        output.push_str(&format!(
            "{:<24} {:>11} {:>11} {:>11}\n",
            "Category", "Limit", "Spent", "Remaining"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.rows {
            let limit = if row.has_limit() {
                row.limit.to_string()
            } else {
                "-".to_string()
            };
            let flag = if row.over_limit { "  OVER" } else { "" };
            output.push_str(&format!(
                "{:<24} {:>11} {:>11} {:>11}{}\n",
                row.category.name(),
                limit,
                row.spent.to_string(),
                row.remaining.to_string(),
                flag
            ));
        }

        output
    }
}
