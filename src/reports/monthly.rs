//! Monthly overview
//!
//! Income, expenses and net balance for one calendar month, with a simple
//! projection of what the month's savings would add up to if repeated.

use chrono::{Datelike, NaiveDate};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, TransactionKind};
use crate::services::Ledger;

use super::category_summary::CategorySummaryReport;

/// Months covered by [`MonthlyOverview::savings_projection`] in the rendered report
pub const PROJECTION_MONTHS: u32 = 5;

#[derive(Debug, Clone)]
pub struct MonthlyOverview {
    pub year: i32,
    pub month: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub income: Money,
    pub expenses: Money,
    pub balance: Money,
    pub transaction_count: usize,
    /// Expense breakdown for the month
    pub expense_summary: CategorySummaryReport,
}

impl MonthlyOverview {
    /// Build the overview for `year`/`month` (1-12)
    pub fn generate(ledger: &Ledger, year: i32, month: u32) -> FinanceResult<Self> {
        let (start_date, end_date) = month_bounds(year, month)?;
        let transactions = ledger.by_date_range(start_date, end_date);

        let income: Money = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount())
            .sum();
        let expenses: Money = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount())
            .sum();

        Ok(Self {
            year,
            month,
            start_date,
            end_date,
            income,
            expenses,
            balance: income - expenses,
            transaction_count: transactions.len(),
            expense_summary: CategorySummaryReport::from_transactions(
                &transactions,
                TransactionKind::Expense,
            ),
        })
    }

    /// The overview for the month containing `date`
    pub fn for_date(ledger: &Ledger, date: NaiveDate) -> FinanceResult<Self> {
        Self::generate(ledger, date.year(), date.month())
    }

    /// Whether income exceeded expenses this month
    pub fn saved_money(&self) -> bool {
        self.balance.is_positive()
    }

    /// This month's balance repeated over `months` months
    pub fn savings_projection(&self, months: u32) -> Money {
        self.balance.times(i64::from(months))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Monthly Overview: {}\n",
            self.start_date.format("%B %Y")
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Total Income:   {:>12}\n", self.income));
        output.push_str(&format!("Total Expenses: {:>12}\n", self.expenses));
        output.push_str(&format!("Balance:        {:>12}\n", self.balance));
        output.push_str(&format!("Transactions:   {:>12}\n", self.transaction_count));
        output.push('\n');

        if self.saved_money() {
            output.push_str("You saved money this month.\n");
            output.push_str(&format!(
                "At this rate you could save about {} in {} months.\n",
                self.savings_projection(PROJECTION_MONTHS),
                PROJECTION_MONTHS
            ));
        } else if self.transaction_count == 0 {
            output.push_str("No transactions this month.\n");
        } else {
            output.push_str("You spent at least as much as you earned this month.\n");
            output.push_str("Consider reviewing your budget to reduce expenses.\n");
        }

        if !self.expense_summary.is_empty() {
            output.push('\n');
            output.push_str(&self.expense_summary.format_terminal());
        }

        output
    }
}

/// First and last day of a calendar month
pub fn month_bounds(year: i32, month: u32) -> FinanceResult<(NaiveDate, NaiveDate)> {
    let invalid = || FinanceError::Validation(format!("Invalid month: {}-{:02}", year, month));

    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_start = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    let end = next_start.pred_opt().ok_or_else(invalid)?;

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add(ledger: &mut Ledger, on: NaiveDate, units: i64, kind: TransactionKind, category: &str) {
        ledger
            .record(on, "entry", Money::from_units(units), kind, Category::new(category).unwrap())
            .unwrap();
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(2024, 2).unwrap(),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            month_bounds(2025, 12).unwrap(),
            (date(2025, 12, 1), date(2025, 12, 31))
        );
        assert!(month_bounds(2025, 13).unwrap_err().is_validation());
        assert!(month_bounds(2025, 0).is_err());
    }

    #[test]
    fn test_overview_includes_month_edges_only() {
        let mut ledger = Ledger::new();
        add(&mut ledger, date(2025, 4, 1), 4500, TransactionKind::Income, "Salary");
        add(&mut ledger, date(2025, 4, 30), 1400, TransactionKind::Expense, "Rent");
        add(&mut ledger, date(2025, 3, 31), 99, TransactionKind::Expense, "Misc");
        add(&mut ledger, date(2025, 5, 1), 10, TransactionKind::Expense, "Misc");

        let overview = MonthlyOverview::generate(&ledger, 2025, 4).unwrap();
        assert_eq!(overview.transaction_count, 2);
        assert_eq!(overview.income, Money::from_units(4500));
        assert_eq!(overview.expenses, Money::from_units(1400));
        assert_eq!(overview.balance, Money::from_units(3100));
        assert!(overview.saved_money());
        assert_eq!(overview.savings_projection(5), Money::from_units(15500));
        assert_eq!(overview.expense_summary.rows.len(), 1);
    }

    #[test]
    fn test_overspent_month() {
        let mut ledger = Ledger::new();
        add(&mut ledger, date(2025, 3, 25), 99, TransactionKind::Expense, "Misc");

        let overview = MonthlyOverview::for_date(&ledger, date(2025, 3, 2)).unwrap();
        assert!(!overview.saved_money());
        let text = overview.format_terminal();
        assert!(text.starts_with("Monthly Overview: March 2025\n"));
        assert!(text.contains("Consider reviewing your budget"));
    }

    #[test]
    fn test_empty_month() {
        let overview = MonthlyOverview::generate(&Ledger::new(), 2025, 1).unwrap();
        assert_eq!(overview.balance, Money::zero());
        assert!(overview.format_terminal().contains("No transactions this month."));
    }
}
