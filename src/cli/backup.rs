use std::path::{Path, PathBuf};

use rusqlite::backup::Backup;

use crate::db::get_connection;
use crate::error::{ExpenseError, Result};
use crate::fmt::format_bytes;
use crate::settings::StoreConfig;

pub fn run(config: &StoreConfig, output: Option<String>) -> Result<()> {
    let dest_path = match output {
        Some(p) => PathBuf::from(p),
        None => default_backup_path(&config.database_path),
    };
    backup_to(config, &dest_path)?;

    let size = std::fs::metadata(&dest_path)?.len();
    println!("Backup saved to {}", dest_path.display());
    println!("Size: {}", format_bytes(size));
    Ok(())
}

fn default_backup_path(db_path: &Path) -> PathBuf {
    let dir = db_path.parent().unwrap_or_else(|| Path::new(".")).join("backups");
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    dir.join(format!("expenses-{stamp}.db"))
}

/// Online copy of the store; concurrent writers keep working while it runs.
pub fn backup_to(config: &StoreConfig, dest_path: &Path) -> Result<()> {
    if let Some(parent) = dest_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let conn = get_connection(config).map_err(ExpenseError::read)?;
    let mut dest_conn = rusqlite::Connection::open(dest_path).map_err(ExpenseError::write)?;
    let backup = Backup::new(&conn, &mut dest_conn).map_err(ExpenseError::read)?;
    backup
        .run_to_completion(100, std::time::Duration::from_millis(10), None)
        .map_err(ExpenseError::read)?;
    tracing::info!(dest = %dest_path.display(), "backup complete");
    Ok(())
}
