pub mod backup;
pub mod categories;
pub mod expenses;
pub mod export;
pub mod init;
pub mod status;
pub mod summary;

use chrono::{Datelike, NaiveDate};
use clap::{Args, Parser, Subcommand};

use crate::error::{ExpenseError, Result};

#[derive(Parser)]
#[command(name = "expenses", about = "Record, list and summarize personal expenses.")]
pub struct Cli {
    /// Database file to use instead of the configured one
    #[arg(long, global = true)]
    pub db: Option<String>,
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database (if needed) and remember its location.
    Init,
    /// Record an expense.
    Add {
        /// Date: YYYY-MM-DD
        date: String,
        /// Amount spent (negative for refunds)
        #[arg(allow_hyphen_values = true)]
        amount: f64,
        /// Category, e.g. 'Food & Dining'
        category: String,
        #[arg(long, default_value = "")]
        subcategory: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// List expenses in a date range, newest first.
    List {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Totals and counts per category for a date range.
    Summary {
        #[command(flatten)]
        range: RangeArgs,
        /// Only this category (exact match)
        #[arg(long)]
        category: Option<String>,
    },
    /// Show the category list.
    Categories,
    /// Export expenses in a date range to CSV.
    Export {
        #[command(flatten)]
        range: RangeArgs,
        /// Output file (default: expenses-<from>-<to>.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// Back up the database.
    Backup {
        /// Output path (default: <db dir>/backups/expenses-YYYYMMDD-HHMMSS.db)
        #[arg(long)]
        output: Option<String>,
    },
    /// Show the database location and summary statistics.
    Status,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    /// Month: YYYY-MM
    #[arg(long, conflicts_with_all = ["from_date", "to_date"])]
    pub month: Option<String>,
    /// Start date: YYYY-MM-DD
    #[arg(long = "from")]
    pub from_date: Option<String>,
    /// End date: YYYY-MM-DD
    #[arg(long = "to")]
    pub to_date: Option<String>,
}

impl RangeArgs {
    /// Inclusive `(start, end)` dates; defaults to the current month.
    pub fn resolve(&self) -> Result<(String, String)> {
        let today = chrono::Local::now().date_naive();
        resolve_range(
            self.month.as_deref(),
            self.from_date.as_deref(),
            self.to_date.as_deref(),
            today,
        )
    }
}

pub(crate) fn resolve_range(
    month: Option<&str>,
    from_date: Option<&str>,
    to_date: Option<&str>,
    today: NaiveDate,
) -> Result<(String, String)> {
    match (from_date, to_date) {
        (Some(from), Some(to)) => {
            let (from, to) = (parse_date(from)?, parse_date(to)?);
            return Ok((from.to_string(), to.to_string()));
        }
        (Some(_), None) => {
            return Err(ExpenseError::InvalidInput(
                "--from requires --to (both date boundaries must be specified)".to_string(),
            ));
        }
        (None, Some(_)) => {
            return Err(ExpenseError::InvalidInput(
                "--to requires --from (both date boundaries must be specified)".to_string(),
            ));
        }
        (None, None) => {}
    }

    let (year, month) = match month {
        Some(m) => parse_month(m)?,
        None => (today.year(), today.month()),
    };
    let (first, last) = month_bounds(year, month)
        .ok_or_else(|| ExpenseError::InvalidInput(format!("month out of range: {year}-{month:02}")))?;
    Ok((first.to_string(), last.to_string()))
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| ExpenseError::InvalidInput(format!("expected a YYYY-MM-DD date, got '{s}'")))
}

fn parse_month(s: &str) -> Result<(i32, u32)> {
    let invalid = || ExpenseError::InvalidInput(format!("expected a YYYY-MM month, got '{s}'"));
    let (y, m) = s.split_once('-').ok_or_else(invalid)?;
    let year: i32 = y.parse().map_err(|_| invalid())?;
    let month: u32 = m.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}
