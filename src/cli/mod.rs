//! Interactive front end
//!
//! `command` parses shell input, `shell` runs it against a session and
//! `demo` prints a seeded sample month.

pub mod command;
pub mod demo;
pub mod shell;

pub use command::{Command, ListFilter, ReportKind};
pub use shell::{Flow, Shell};
