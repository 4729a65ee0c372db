//! Finance tracker - personal income and expense ledger
//!
//! This library records income and expense transactions per user, tracks
//! spending limits per category and overall, and summarizes the ledger into
//! terminal reports.
//!
//! # Architecture
//!
//! - `models`: Value types (money, categories, transactions, budgets, goals)
//! - `services`: The ledger, the budget tracker and the per-user session
//! - `reports`: Category summaries, monthly overviews, budget status
//! - `display`: Register-style transaction listings
//! - `config`: Settings file and path resolution
//! - `cli`: Shell command parser, interactive shell and demo
//! - `error`: Crate error type
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use finance_tracker::models::{Money, TransactionKind};
//! use finance_tracker::services::Session;
//!
//! let mut session = Session::new("alex");
//! let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
//! session
//!     .record(date, "Salary", Money::from_units(4500), TransactionKind::Income, "Salary")
//!     .unwrap();
//! assert_eq!(session.ledger.balance(), Money::from_units(4500));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{FinanceError, FinanceResult};
