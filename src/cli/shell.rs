//! Interactive shell
//!
//! Reads commands line by line, applies them to one [`Session`] and prints
//! the result. Bad input and missing transactions are reported and the loop
//! keeps going; only `quit` or end of input stops it.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use tracing::debug;

use crate::config::Settings;
use crate::display::format_transaction_register;
use crate::error::FinanceResult;
use crate::models::{Category, Money, SavingsGoal, TransactionKind};
use crate::reports::{BudgetReport, CategorySummaryReport, MonthlyOverview};
use crate::services::Session;

use super::command::{Command, ListFilter, ReportKind, HELP};

/// Result of running one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

pub struct Shell {
    session: Session,
    settings: Settings,
    today: NaiveDate,
    prompt: bool,
}

impl Shell {
    /// A shell over `session`; `today` is the default date for new entries
    pub fn new(session: Session, settings: Settings, today: NaiveDate) -> Self {
        Self {
            session,
            settings,
            today,
            prompt: false,
        }
    }

    /// Print a `> ` prompt before each line (for interactive terminals)
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Run until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> io::Result<()> {
        writeln!(
            output,
            "Finance tracker for {}. Type 'help' for commands.",
            self.session.owner()
        )?;

        let mut lines = input.lines();
        loop {
            if self.prompt {
                write!(output, "> ")?;
                output.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            match self.handle_line(&line) {
                Ok(Flow::Continue(text)) => write!(output, "{}", text)?,
                Ok(Flow::Quit) => break,
                Err(err) => writeln!(output, "Error: {}", err)?,
            }
        }

        writeln!(output, "Goodbye.")?;
        Ok(())
    }

    /// Parse and run a single line
    pub fn handle_line(&mut self, line: &str) -> FinanceResult<Flow> {
        match Command::parse(line)? {
            Some(command) => self.execute(command),
            None => Ok(Flow::Continue(String::new())),
        }
    }

    /// Apply one command to the session
    pub fn execute(&mut self, command: Command) -> FinanceResult<Flow> {
        debug!(?command, "executing shell command");

        let text = match command {
            Command::Record {
                kind,
                amount,
                category,
                description,
                date,
            } => {
                let date = date.unwrap_or(self.today);
                let id = self
                    .session
                    .record(date, &description, amount, kind, &category)?;
                format!("Recorded {} {} as {}.\n", kind, self.money(amount), id)
            }
            Command::List(filter) => {
                let ledger = &self.session.ledger;
                let transactions = match filter {
                    ListFilter::All => ledger.all(),
                    ListFilter::Kind(kind) => ledger.by_kind(kind),
                    ListFilter::Category(name) => ledger.by_category(&name),
                    ListFilter::Range { start, end } => ledger.by_date_range(start, end),
                };
                format_transaction_register(&transactions, &self.settings.date_format)
            }
            Command::Remove(id) => {
                let removed = self.session.ledger.remove(id)?;
                format!("Removed {}. Type 'undo' to restore it.\n", removed)
            }
            Command::Undo => {
                let restored = self.session.ledger.undo_last_deletion()?;
                format!("Restored {}.\n", restored)
            }
            Command::Balance => {
                let ledger = &self.session.ledger;
                format!(
                    "Income:   {}\nExpenses: {}\nBalance:  {}\n",
                    self.money(ledger.total_income()),
                    self.money(ledger.total_expenses()),
                    self.money(ledger.balance())
                )
            }
            Command::OverallLimit(amount) => {
                self.session.set_overall_budget(amount)?;
                format!("Overall limit set to {}.\n", self.money(amount))
            }
            Command::CategoryLimit { category, amount } => {
                self.session.set_budget(&category, amount)?;
                let category = Category::new(&category)?;
                let spent = self
                    .session
                    .ledger
                    .sum_by_category(TransactionKind::Expense)
                    .get(&category)
                    .copied()
                    .unwrap_or_default();
                let mut text = format!("Limit for {} set to {}.\n", category, self.money(amount));
                if self.session.budgets.is_over_limit(&category, spent) {
                    text.push_str(&format!(
                        "Warning: {} already spent in {}.\n",
                        self.money(spent),
                        category
                    ));
                }
                text
            }
            Command::Budget => BudgetReport::generate(&self.session).format_terminal(),
            Command::Report(ReportKind::Income) => {
                CategorySummaryReport::generate(&self.session.ledger, TransactionKind::Income)
                    .format_terminal()
            }
            Command::Report(ReportKind::Expense) => {
                CategorySummaryReport::generate(&self.session.ledger, TransactionKind::Expense)
                    .format_terminal()
            }
            Command::Report(ReportKind::Month(month)) => {
                let overview = match month {
                    Some((year, month)) => {
                        MonthlyOverview::generate(&self.session.ledger, year, month)?
                    }
                    None => MonthlyOverview::for_date(&self.session.ledger, self.today)?,
                };
                overview.format_terminal()
            }
            Command::GoalAdd { name, target } => {
                let goal = SavingsGoal::new(&name, target)?;
                let text = format!("Goal {} created.\n", goal);
                self.session.add_goal(goal);
                text
            }
            Command::GoalFund { name, amount } => {
                let goal = self.session.contribute(&name, amount)?;
                let mut text = format!("{}\n", goal);
                if goal.is_reached() {
                    text.push_str("Goal reached!\n");
                }
                text
            }
            Command::Goals => {
                if self.session.goals().is_empty() {
                    "No savings goals.\n".to_string()
                } else {
                    self.session
                        .goals()
                        .iter()
                        .map(|g| format!("- {}\n", g))
                        .collect()
                }
            }
            Command::Categories => {
                let categories = self.session.categories();
                if categories.is_empty() {
                    "No categories yet.\n".to_string()
                } else {
                    categories.iter().map(|c| format!("- {}\n", c)).collect()
                }
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Flow::Quit),
        };

        Ok(Flow::Continue(text))
    }

    fn money(&self, amount: Money) -> String {
        self.settings.format_money(amount)
    }
}
