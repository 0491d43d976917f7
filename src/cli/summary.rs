use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::cli::expenses::print_json;
use crate::cli::RangeArgs;
use crate::error::Result;
use crate::facade::ExpenseTools;
use crate::fmt::amount;
use crate::models::CategorySummary;
use crate::repository::ExpenseRepository;

pub async fn run(repo: &ExpenseRepository, range: &RangeArgs, category: Option<&str>, json: bool) -> Result<()> {
    let (from, to) = range.resolve()?;

    if json {
        let items = ExpenseTools::new(repo.clone()).summarize(&from, &to, category).await;
        print_json(&items);
        return Ok(());
    }

    let groups = repo.summarize(&from, &to, category).await?;
    println!("{}", format_summary(&groups, &from, &to));
    Ok(())
}

pub fn format_summary(groups: &[CategorySummary], from: &str, to: &str) -> String {
    let title = format!("Summary {from} \u{2192} {to}");
    if groups.is_empty() {
        return format!("{title}\nNo expenses in this range.");
    }

    let total: f64 = groups.iter().map(|g| g.total_amount).sum();
    let count: i64 = groups.iter().map(|g| g.count).sum();

    let mut table = Table::new();
    table.set_header(vec!["Category", "Amount", "%", "Count"]);
    for g in groups {
        let pct = if total != 0.0 { g.total_amount / total * 100.0 } else { 0.0 };
        table.add_row(vec![
            Cell::new(&g.category),
            Cell::new(amount(g.total_amount)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{pct:.1}%")).set_alignment(CellAlignment::Right),
            Cell::new(g.count),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(amount(total).bold()).set_alignment(CellAlignment::Right),
        Cell::new(""),
        Cell::new(count),
    ]);
    format!("{title}\n{table}")
}
