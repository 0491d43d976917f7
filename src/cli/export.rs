use std::path::{Path, PathBuf};

use crate::cli::RangeArgs;
use crate::error::Result;
use crate::models::Expense;
use crate::repository::ExpenseRepository;

pub async fn run(repo: &ExpenseRepository, range: &RangeArgs, output: Option<String>) -> Result<()> {
    let (from, to) = range.resolve()?;
    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("expenses-{from}-{to}.csv")));

    let rows = repo.list(&from, &to).await?;
    write_csv(&rows, &path)?;
    println!("Wrote {} expenses to {}", rows.len(), path.display());
    Ok(())
}

pub fn write_csv(rows: &[Expense], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut wtr = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        wtr.write_record(["id", "date", "amount", "category", "subcategory", "note"])?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
