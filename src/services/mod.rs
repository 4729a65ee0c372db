//! Business logic layer
//!
//! The ledger and budget tracker hold all mutable bookkeeping state; the
//! session ties one of each to a single user.

pub mod budget_tracker;
pub mod ledger;
pub mod session;

pub use budget_tracker::BudgetTracker;
pub use ledger::Ledger;
pub use session::Session;
