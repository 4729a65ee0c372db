//! Terminal display formatting

pub mod transaction;

pub use transaction::{format_transaction_register, format_transaction_row};
