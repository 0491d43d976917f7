use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::cli::{parse_date, RangeArgs};
use crate::error::Result;
use crate::facade::ExpenseTools;
use crate::fmt::amount;
use crate::models::{Expense, NewExpense};
use crate::repository::ExpenseRepository;

pub async fn add(repo: &ExpenseRepository, expense: NewExpense, json: bool) -> Result<()> {
    // The store takes any string; check it here so typos don't land in the table.
    parse_date(&expense.date)?;

    if json {
        let reply = ExpenseTools::new(repo.clone())
            .add_expense(
                &expense.date,
                expense.amount,
                &expense.category,
                Some(expense.subcategory.as_str()),
                Some(expense.note.as_str()),
            )
            .await;
        // Failures are part of the JSON reply.
        print_json(&reply);
        return Ok(());
    }

    let summary = format!("{} {} ({})", expense.date, amount(expense.amount), expense.category);
    let id = repo.insert(expense).await?;
    println!("Added expense #{id}: {summary}");
    Ok(())
}

pub async fn list(repo: &ExpenseRepository, range: &RangeArgs, json: bool) -> Result<()> {
    let (from, to) = range.resolve()?;

    if json {
        let items = ExpenseTools::new(repo.clone()).list_expenses(&from, &to).await;
        print_json(&items);
        return Ok(());
    }

    let rows = repo.list(&from, &to).await?;
    println!("{}", format_expenses(&rows, &from, &to));
    Ok(())
}

pub fn format_expenses(rows: &[Expense], from: &str, to: &str) -> String {
    let title = format!("Expenses {from} \u{2192} {to}");
    if rows.is_empty() {
        return format!("{title}\nNo expenses in this range.");
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Category", "Subcategory", "Amount", "Note"]);
    for r in rows {
        table.add_row(vec![
            Cell::new(r.id),
            Cell::new(&r.date),
            Cell::new(&r.category),
            Cell::new(&r.subcategory),
            Cell::new(amount(r.amount)).set_alignment(CellAlignment::Right),
            Cell::new(&r.note),
        ]);
    }
    let total: f64 = rows.iter().map(|r| r.amount).sum();
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(""),
        Cell::new(format!("{} entries", rows.len())),
        Cell::new(""),
        Cell::new(amount(total).bold()).set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);
    format!("{title}\n{table}")
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => tracing::error!(error = %e, "could not serialize output"),
    }
}
