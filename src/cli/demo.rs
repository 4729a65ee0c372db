//! Sample month
//!
//! Seeds a session with a month of salary, rent and everyday spending, then
//! prints every report over it.

use std::io::Write;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::display::format_transaction_register;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, TransactionKind};
use crate::reports::{BudgetReport, CategorySummaryReport, MonthlyOverview};
use crate::services::Session;

/// The day the sample data is recorded "as of"
pub fn demo_today() -> FinanceResult<NaiveDate> {
    date(2025, 4, 14)
}

fn date(year: i32, month: u32, day: u32) -> FinanceResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| FinanceError::Validation(format!("Invalid date {}-{}-{}", year, month, day)))
}

/// Populate `session` with the sample budgets and transactions
pub fn seed(session: &mut Session) -> FinanceResult<()> {
    use TransactionKind::{Expense, Income};

    for (category, limit) in [
        ("Groceries", 350),
        ("Transport", 100),
        ("Dining Out", 150),
        ("Rent", 1400),
    ] {
        session.set_budget(category, Money::from_units(limit))?;
    }

    let entries = [
        (1, "Monthly Salary", 450_000, Income, "Salary"),
        (1, "Rent Payment", 140_000, Expense, "Rent"),
        (3, "Grocery Store Trip", 8_550, Expense, "Groceries"),
        (5, "Gas Bill", 6_500, Expense, "Utilities"),
        (7, "Bus Pass", 5_000, Expense, "Transport"),
        (10, "Dinner with Friends", 6_000, Expense, "Dining Out"),
        (12, "More Groceries", 4_230, Expense, "Groceries"),
        (14, "Coffee Shop", 575, Expense, "Dining Out"),
    ];
    let mut ids = Vec::with_capacity(entries.len());
    for (day, description, cents, kind, category) in entries {
        ids.push(session.record(
            date(2025, 4, day)?,
            description,
            Money::from_cents(cents),
            kind,
            category,
        )?);
    }

    // Drop the last two entries, then bring the groceries back.
    if let [.., groceries, coffee] = ids.as_slice() {
        session.ledger.remove(*coffee)?;
        session.ledger.remove(*groceries)?;
        session.ledger.undo_last_deletion()?;
    }

    session.record(
        date(2025, 4, 12)?,
        "Grocery Top-up",
        Money::from_cents(4_010),
        Expense,
        "Groceries",
    )?;
    session.record(
        date(2025, 3, 25)?,
        "Old Expense",
        Money::from_units(99),
        Expense,
        "Miscellaneous",
    )?;

    Ok(())
}

/// Seed a fresh session and print the ledger and all reports
pub fn run<W: Write>(settings: &Settings, output: &mut W) -> FinanceResult<Session> {
    let mut session = Session::with_settings("demo", settings);
    seed(&mut session)?;
    let today = demo_today()?;

    writeln!(output, "Transactions")?;
    write!(
        output,
        "{}",
        format_transaction_register(&session.ledger.all(), &settings.date_format)
    )?;
    writeln!(output)?;

    for kind in TransactionKind::all() {
        write!(
            output,
            "{}",
            CategorySummaryReport::generate(&session.ledger, *kind).format_terminal()
        )?;
        writeln!(output)?;
    }

    write!(
        output,
        "{}",
        MonthlyOverview::for_date(&session.ledger, today)?.format_terminal()
    )?;
    writeln!(output)?;
    write!(
        output,
        "{}",
        MonthlyOverview::generate(&session.ledger, 2025, 3)?.format_terminal()
    )?;
    writeln!(output)?;

    write!(output, "{}", BudgetReport::generate(&session).format_terminal())?;
    writeln!(output)?;

    writeln!(output, "Categories")?;
    for category in session.categories() {
        writeln!(output, "- {}", category)?;
    }
    writeln!(output)?;

    writeln!(output, "Budgets")?;
    for budget in session.budgets.budgets() {
        writeln!(output, "- {}", budget)?;
    }

    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TransactionId};

    #[test]
    fn test_seeded_ledger() {
        let mut session = Session::new("demo");
        seed(&mut session).unwrap();

        let ledger = &session.ledger;
        assert_eq!(ledger.len(), 9);
        assert!(ledger.get(TransactionId::new(8)).is_none());
        // the restored entry goes to the end
        assert_eq!(ledger.all()[5].description(), "Dinner with Friends");
        assert_eq!(ledger.all()[6].description(), "More Groceries");

        assert_eq!(ledger.total_income(), Money::from_units(4500));
        assert_eq!(ledger.total_expenses(), Money::from_cents(184_190));

        let groceries = Category::new("groceries").unwrap();
        assert_eq!(
            session.budgets.remaining_by_category(
                &ledger.sum_by_category(TransactionKind::Expense)
            )[&groceries],
            Money::from_cents(18_210)
        );
    }

    #[test]
    fn test_run_prints_reports() {
        let mut output = Vec::new();
        let session = run(&Settings::default(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("Monthly Overview: April 2025"));
        assert!(text.contains("Monthly Overview: March 2025"));
        assert!(text.contains("Budget Report"));
        assert!(text.contains("- Rent: $1400.00"));
        assert_eq!(session.owner(), "demo");
    }
}
