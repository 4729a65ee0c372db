//! Shell command parsing
//!
//! Turns one line of user input into a [`Command`]. Words are split on
//! whitespace; double quotes group words, so multi-word categories are
//! written as `"Dining Out"`. A trailing `@YYYY-MM-DD` word sets the date of
//! a new transaction.

use chrono::NaiveDate;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, TransactionId, TransactionKind};

/// What the `list` command should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListFilter {
    All,
    Kind(TransactionKind),
    Category(String),
    Range { start: NaiveDate, end: NaiveDate },
}

/// Which report the `report` command should print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Income,
    Expense,
    /// Month of the given year; `None` means the current month
    Month(Option<(i32, u32)>),
}

/// One parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Record {
        kind: TransactionKind,
        amount: Money,
        category: String,
        description: String,
        date: Option<NaiveDate>,
    },
    List(ListFilter),
    Remove(TransactionId),
    Undo,
    Balance,
    OverallLimit(Money),
    CategoryLimit { category: String, amount: Money },
    Budget,
    Report(ReportKind),
    GoalAdd { name: String, target: Money },
    GoalFund { name: String, amount: Money },
    Goals,
    Categories,
    Help,
    Quit,
}

/// Text printed by `help`
pub const HELP: &str = "\
Commands:
  income <amount> <category> <description...> [@YYYY-MM-DD]
  expense <amount> <category> <description...> [@YYYY-MM-DD]
  list [income|expense|category <name>|from <date> to <date>]
  remove <id>                   delete a transaction (can be undone)
  undo                          restore the last deleted transaction
  balance                       income, expenses and balance
  limit overall <amount>        set the overall spending limit
  limit <category> <amount>     set a category spending limit
                                (write \"Overall\" in quotes for a category of that name)
  budget                        budget status per category
  report income|expense         category summary
  report month [YYYY-MM]        monthly overview
  goal add <name> <target>      create a savings goal
  goal fund <name> <amount>     pay into a savings goal
  goals                         list savings goals
  categories                    list known categories
  help                          show this help
  quit                          leave the shell
Quote multi-word names: expense 12.50 \"Dining Out\" lunch
";

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> FinanceResult<Option<Self>> {
        let (words, quoted): (Vec<String>, Vec<bool>) = split_words(line)?.into_iter().unzip();
        let Some((head, rest)) = words.split_first() else {
            return Ok(None);
        };

        let command = match head.to_lowercase().as_str() {
            "income" => parse_record(TransactionKind::Income, rest)?,
            "expense" => parse_record(TransactionKind::Expense, rest)?,
            "list" | "ls" => Self::List(parse_list(rest)?),
            "remove" | "rm" => {
                let [id] = rest else {
                    return Err(usage("remove <id>"));
                };
                let id = id
                    .parse::<TransactionId>()
                    .map_err(|_| FinanceError::Parse(format!("Invalid transaction id '{}'", id)))?;
                Self::Remove(id)
            }
            "undo" => no_args(rest, Self::Undo, "undo")?,
            "balance" => no_args(rest, Self::Balance, "balance")?,
            "limit" => match rest {
                [scope, amount] if scope.eq_ignore_ascii_case("overall") && !quoted[1] => {
                    Self::OverallLimit(parse_money(amount)?)
                }
                [category, amount] => Self::CategoryLimit {
                    category: category.clone(),
                    amount: parse_money(amount)?,
                },
                _ => return Err(usage("limit overall <amount> | limit <category> <amount>")),
            },
            "budget" => no_args(rest, Self::Budget, "budget")?,
            "report" => Self::Report(parse_report(rest)?),
            "goal" => match rest {
                [action, name, amount] if action.eq_ignore_ascii_case("add") => Self::GoalAdd {
                    name: name.clone(),
                    target: parse_money(amount)?,
                },
                [action, name, amount] if action.eq_ignore_ascii_case("fund") => Self::GoalFund {
                    name: name.clone(),
                    amount: parse_money(amount)?,
                },
                _ => return Err(usage("goal add <name> <target> | goal fund <name> <amount>")),
            },
            "goals" => no_args(rest, Self::Goals, "goals")?,
            "categories" => no_args(rest, Self::Categories, "categories")?,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => {
                return Err(FinanceError::Parse(format!(
                    "Unknown command '{}'. Type 'help' for a list of commands.",
                    other
                )))
            }
        };

        Ok(Some(command))
    }
}

fn parse_record(kind: TransactionKind, args: &[String]) -> FinanceResult<Command> {
    let mut args = args.to_vec();

    let date = match args.last().and_then(|w| w.strip_prefix('@')) {
        Some(raw) => {
            let date = parse_date(raw)?;
            args.pop();
            Some(date)
        }
        None => None,
    };

    let [amount, category, description @ ..] = args.as_slice() else {
        return Err(usage("income|expense <amount> <category> <description...> [@YYYY-MM-DD]"));
    };
    if description.is_empty() {
        return Err(usage("income|expense <amount> <category> <description...> [@YYYY-MM-DD]"));
    }

    Ok(Command::Record {
        kind,
        amount: parse_money(amount)?,
        category: category.clone(),
        description: description.join(" "),
        date,
    })
}

fn parse_list(args: &[String]) -> FinanceResult<ListFilter> {
    let lowered: Vec<String> = args.iter().map(|a| a.to_lowercase()).collect();
    let words: Vec<&str> = lowered.iter().map(String::as_str).collect();

    match words.as_slice() {
        [] => Ok(ListFilter::All),
        ["income"] => Ok(ListFilter::Kind(TransactionKind::Income)),
        ["expense"] | ["expenses"] => Ok(ListFilter::Kind(TransactionKind::Expense)),
        ["category", _] => Ok(ListFilter::Category(args[1].clone())),
        ["from", start, "to", end] => {
            let start = parse_date(start)?;
            let end = parse_date(end)?;
            if end < start {
                return Err(FinanceError::Parse(format!(
                    "End date {} is before start date {}",
                    end, start
                )));
            }
            Ok(ListFilter::Range { start, end })
        }
        _ => Err(usage("list [income|expense|category <name>|from <date> to <date>]")),
    }
}

fn parse_report(args: &[String]) -> FinanceResult<ReportKind> {
    match args {
        [kind] if kind.eq_ignore_ascii_case("income") => Ok(ReportKind::Income),
        [kind] if kind.eq_ignore_ascii_case("expense") || kind.eq_ignore_ascii_case("expenses") => {
            Ok(ReportKind::Expense)
        }
        [kind] if kind.eq_ignore_ascii_case("month") => Ok(ReportKind::Month(None)),
        [kind, month] if kind.eq_ignore_ascii_case("month") => {
            Ok(ReportKind::Month(Some(parse_year_month(month)?)))
        }
        _ => Err(usage("report income|expense|month [YYYY-MM]")),
    }
}

fn no_args(args: &[String], command: Command, name: &str) -> FinanceResult<Command> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(usage(name))
    }
}

fn usage(form: &str) -> FinanceError {
    FinanceError::Parse(format!("Usage: {}", form))
}

pub fn parse_money(raw: &str) -> FinanceResult<Money> {
    Money::parse(raw).map_err(|e| FinanceError::Parse(e.to_string()))
}

pub fn parse_date(raw: &str) -> FinanceResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| FinanceError::Parse(format!("Invalid date '{}' (expected YYYY-MM-DD)", raw)))
}

fn parse_year_month(raw: &str) -> FinanceResult<(i32, u32)> {
    let invalid = || FinanceError::Parse(format!("Invalid month '{}' (expected YYYY-MM)", raw));
    let (year, month) = raw.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

/// Split a line into words, keeping double-quoted groups together.
/// Each word carries whether any part of it was quoted.
fn split_words(line: &str) -> FinanceResult<Vec<(String, bool)>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    words.push((std::mem::take(&mut current), quoted));
                }
                quoted = false;
            }
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err(FinanceError::Parse("Unterminated quote".into()));
    }
    if !current.is_empty() || quoted {
        words.push((current, quoted));
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_record_with_date_and_quotes() {
        assert_eq!(
            parse(r#"expense 12.50 "Dining Out" lunch with Sam @2025-04-10"#),
            Command::Record {
                kind: TransactionKind::Expense,
                amount: Money::from_cents(1250),
                category: "Dining Out".into(),
                description: "lunch with Sam".into(),
                date: Some(date(2025, 4, 10)),
            }
        );
    }

    #[test]
    fn test_record_without_date() {
        match parse("income 4500 Salary April pay") {
            Command::Record { kind, date, description, .. } => {
                assert_eq!(kind, TransactionKind::Income);
                assert_eq!(date, None);
                assert_eq!(description, "April pay");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_record_errors() {
        assert!(matches!(
            Command::parse("expense 10 Food"),
            Err(FinanceError::Parse(_))
        ));
        assert!(Command::parse("expense ten Food snack").is_err());
        assert!(Command::parse("expense 10 Food snack @2025-02-30").is_err());
    }

    #[test]
    fn test_list_variants() {
        assert_eq!(parse("list"), Command::List(ListFilter::All));
        assert_eq!(
            parse("list expense"),
            Command::List(ListFilter::Kind(TransactionKind::Expense))
        );
        assert_eq!(
            parse("list category Food"),
            Command::List(ListFilter::Category("Food".into()))
        );
        assert_eq!(
            parse("list from 2025-04-01 to 2025-04-30"),
            Command::List(ListFilter::Range {
                start: date(2025, 4, 1),
                end: date(2025, 4, 30),
            })
        );
        assert!(Command::parse("list from 2025-05-01 to 2025-04-01").is_err());
    }

    #[test]
    fn test_remove_and_limits() {
        assert_eq!(parse("remove #3"), Command::Remove(TransactionId::new(3)));
        assert!(Command::parse("remove x").is_err());
        assert_eq!(
            parse("limit overall 2000"),
            Command::OverallLimit(Money::from_units(2000))
        );
        assert_eq!(
            parse("limit Groceries 350"),
            Command::CategoryLimit {
                category: "Groceries".into(),
                amount: Money::from_units(350),
            }
        );
        assert_eq!(
            parse("limit Groceries -5"),
            Command::CategoryLimit {
                category: "Groceries".into(),
                amount: Money::from_units(-5),
            }
        );
    }

    #[test]
    fn test_reports_and_goals() {
        assert_eq!(parse("report income"), Command::Report(ReportKind::Income));
        assert_eq!(
            parse("report month 2025-03"),
            Command::Report(ReportKind::Month(Some((2025, 3))))
        );
        assert!(Command::parse("report month 2025-13").is_err());
        assert_eq!(
            parse("goal add Holiday 1000"),
            Command::GoalAdd {
                name: "Holiday".into(),
                target: Money::from_units(1000),
            }
        );
        assert_eq!(parse("goals"), Command::Goals);
    }

    #[test]
    fn test_unknown_and_misc() {
        assert!(Command::parse("dance").unwrap_err().to_string().contains("Unknown command"));
        assert!(Command::parse("undo now").is_err());
        assert_eq!(parse("QUIT"), Command::Quit);
        assert!(Command::parse("expense 1 \"Food lunch").is_err());
    }

    #[test]
    fn test_split_words_keeps_empty_quotes() {
        assert_eq!(
            split_words(r#"limit "" 5"#).unwrap(),
            vec![
                ("limit".to_string(), false),
                (String::new(), true),
                ("5".to_string(), false)
            ]
        );
    }

    #[test]
    fn test_quoted_overall_is_a_category() {
        assert_eq!(
            parse(r#"limit "Overall" 25"#),
            Command::CategoryLimit {
                category: "Overall".into(),
                amount: Money::from_units(25),
            }
        );
        assert_eq!(
            parse("limit OVERALL 25"),
            Command::OverallLimit(Money::from_units(25))
        );
    }
}
