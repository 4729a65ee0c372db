//! Reports module for the finance tracker
//!
//! Each report is built from a ledger (or a whole session) and can render
//! itself for the terminal.

pub mod budget_report;
pub mod category_summary;
pub mod monthly;

pub use budget_report::BudgetReport;
pub use category_summary::{CategoryRow, CategorySummaryReport};
pub use monthly::{month_bounds, MonthlyOverview};
