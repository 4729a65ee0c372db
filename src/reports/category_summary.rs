//! Income / expense summary
//!
//! Totals for one transaction kind broken down by category, with each
//! category's share of the total and the average transaction size.

use crate::models::{Category, Money, Transaction, TransactionKind};
use crate::services::ledger::sum_by_category;
use crate::services::Ledger;

/// One category line of a summary
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub category: Category,
    pub amount: Money,
    pub transaction_count: usize,
    /// Share of the report total
    pub percentage: f64,
}

/// Summary of all income or all expenses
#[derive(Debug, Clone)]
pub struct CategorySummaryReport {
    pub kind: TransactionKind,
    pub total: Money,
    pub transaction_count: usize,
    /// Largest category first
    pub rows: Vec<CategoryRow>,
}

impl CategorySummaryReport {
    /// Summarise every transaction of `kind` in the ledger
    pub fn generate(ledger: &Ledger, kind: TransactionKind) -> Self {
        Self::from_transactions(&ledger.by_kind(kind), kind)
    }

    /// Summarise an arbitrary set of transactions; other kinds are ignored
    pub fn from_transactions(transactions: &[Transaction], kind: TransactionKind) -> Self {
        let matching: Vec<&Transaction> =
            transactions.iter().filter(|t| t.kind() == kind).collect();
        let total: Money = matching.iter().map(|t| t.amount()).sum();

        let mut rows: Vec<CategoryRow> = sum_by_category(transactions, kind)
            .into_iter()
            .map(|(category, amount)| {
                let transaction_count = matching
                    .iter()
                    .filter(|t| t.category() == &category)
                    .count();
                CategoryRow {
                    percentage: amount.percentage_of(total),
                    category,
                    amount,
                    transaction_count,
                }
            })
            .collect();

        // Largest first; the map already gave us name order for ties
        rows.sort_by(|a, b| b.amount.cmp(&a.amount));

        Self {
            kind,
            total,
            transaction_count: matching.len(),
            rows,
        }
    }

    /// Average amount per transaction of this kind
    pub fn average(&self) -> Money {
        self.total.average(self.transaction_count)
    }

    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let label = match self.kind {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expenses",
        };

        let mut output = String::new();
        output.push_str(&format!("{} Summary\n", label));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Total {}: {}\n", label, self.total));

        if self.is_empty() {
            output.push_str(&format!("No {} data available.\n", label.to_lowercase()));
            return output;
        }

        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>12} {:>6} {:>7}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<30} {:>12} {:>6} {:>6.1}%\n",
                row.category.name(),
                row.amount.to_string(),
                row.transaction_count,
                row.percentage
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Average per transaction: {}\n",
            self.average()
        ));

        output
    }
}
