//! Caller-facing tool shapes.
//!
//! `add_expense` answers with a `status`-tagged object. `list_expenses` and
//! `summarize` answer with a plain array, and on failure with a one-element
//! array holding the error object. Callers already depend on that
//! error-inside-the-array shape, so it is kept here and nowhere else: the
//! repository underneath returns ordinary `Result`s.

use serde::Serialize;

use crate::models::{CategorySummary, Expense, NewExpense};
use crate::repository::ExpenseRepository;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AddReply {
    Success { id: i64, message: String },
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorItem {
    pub status: &'static str,
    pub message: String,
}

impl ErrorItem {
    fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ListItem {
    Expense(Expense),
    Error(ErrorItem),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SummaryItem {
    Group(CategorySummary),
    Error(ErrorItem),
}

#[derive(Debug, Clone)]
pub struct ExpenseTools {
    repo: ExpenseRepository,
}

impl ExpenseTools {
    pub fn new(repo: ExpenseRepository) -> Self {
        Self { repo }
    }

    pub async fn add_expense(
        &self,
        date: &str,
        amount: f64,
        category: &str,
        subcategory: Option<&str>,
        note: Option<&str>,
    ) -> AddReply {
        let expense = NewExpense::new(date, amount, category)
            .subcategory(subcategory.unwrap_or_default())
            .note(note.unwrap_or_default());
        match self.repo.insert(expense).await {
            Ok(id) => AddReply::Success {
                id,
                message: "Expense added successfully".to_string(),
            },
            Err(e) => AddReply::Error { message: e.to_string() },
        }
    }

    pub async fn list_expenses(&self, start_date: &str, end_date: &str) -> Vec<ListItem> {
        match self.repo.list(start_date, end_date).await {
            Ok(rows) => rows.into_iter().map(ListItem::Expense).collect(),
            Err(e) => vec![ListItem::Error(ErrorItem::new(e.to_string()))],
        }
    }

    pub async fn summarize(&self, start_date: &str, end_date: &str, category: Option<&str>) -> Vec<SummaryItem> {
        match self.repo.summarize(start_date, end_date, category).await {
            Ok(groups) => groups.into_iter().map(SummaryItem::Group).collect(),
            Err(e) => vec![SummaryItem::Error(ErrorItem::new(e.to_string()))],
        }
    }
}
