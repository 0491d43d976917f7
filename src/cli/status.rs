use crate::error::Result;
use crate::fmt::format_bytes;
use crate::repository::ExpenseRepository;
use crate::settings::Settings;

pub async fn run(settings: &Settings, repo: &ExpenseRepository) -> Result<()> {
    let db_path = &repo.config().database_path;

    println!("Database:    {}", db_path.display());
    let size = std::fs::metadata(db_path)?.len();
    println!("DB size:     {}", format_bytes(size));
    match settings.categories_file() {
        Some(p) => println!("Categories:  {}", p.display()),
        None => println!("Categories:  (built-in)"),
    }

    let count = repo.count().await?;
    println!();
    println!("Expenses:    {count}");
    Ok(())
}
