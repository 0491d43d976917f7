use comfy_table::Table;

use crate::categories::categories_json;
use crate::error::{ExpenseError, Result};
use crate::settings::Settings;

pub fn run(settings: &Settings, json: bool) -> Result<()> {
    let doc = categories_json(settings.categories_file().as_deref());
    if json {
        println!("{doc}");
        return Ok(());
    }

    let parsed: serde_json::Value =
        serde_json::from_str(&doc).map_err(|e| ExpenseError::Settings(e.to_string()))?;
    if let Some(err) = parsed.get("error").and_then(|e| e.as_str()) {
        return Err(ExpenseError::Settings(format!("categories file: {err}")));
    }

    let mut table = Table::new();
    table.set_header(vec!["Category"]);
    for name in parsed["categories"].as_array().into_iter().flatten() {
        table.add_row(vec![name.as_str().unwrap_or_default()]);
    }
    println!("Categories\n{table}");
    Ok(())
}
