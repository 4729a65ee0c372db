//! Transaction display formatting
//!
//! Register-style listing of ledger transactions for the terminal.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{Money, Transaction, TransactionKind};

/// Fallback used when `date_format` cannot render a date
const ISO_DATE: &str = "%Y-%m-%d";

/// Format a single transaction as a register row
pub fn format_transaction_row(txn: &Transaction, date_format: &str) -> String {
    let direction = match txn.kind() {
        TransactionKind::Income => "+",
        TransactionKind::Expense => "-",
    };

    format!(
        "{:>5} {} {} {:<16} {:<24} {:>12}",
        txn.id().to_string(),
        format_date(txn.date(), date_format),
        direction,
        truncate(txn.category().name(), 16),
        truncate(txn.description(), 24),
        txn.signed_amount().to_string()
    )
}

/// Format a list of transactions as a register with a closing balance
pub fn format_transaction_register(transactions: &[Transaction], date_format: &str) -> String {
    if transactions.is_empty() {
        return "No transactions to display.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5} {:10} {} {:<16} {:<24} {:>12}\n",
        "Id", "Date", " ", "Category", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(74));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, date_format));
        output.push('\n');
    }

    let balance: Money = transactions.iter().map(Transaction::signed_amount).sum();
    output.push_str(&"-".repeat(74));
    output.push('\n');
    output.push_str(&format!(
        "{} transactions, balance {}\n",
        transactions.len(),
        balance
    ));

    output
}

/// Render `date` with `date_format`, falling back to ISO on a bad format
pub fn format_date(date: NaiveDate, date_format: &str) -> String {
    let mut rendered = String::new();
    if write!(rendered, "{}", date.format(date_format)).is_err() {
        return date.format(ISO_DATE).to_string();
    }
    rendered
}

/// Truncate to `max_len` characters, marking the cut with `...`
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
