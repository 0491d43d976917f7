use std::path::Path;

use rusqlite::Connection;

use crate::error::{ExpenseError, Result};
use crate::settings::StoreConfig;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    amount REAL NOT NULL,
    category TEXT NOT NULL,
    subcategory TEXT DEFAULT '',
    note TEXT DEFAULT ''
);
";

/// Open a fresh connection against the store. Callers own it for one operation.
pub fn get_connection(config: &StoreConfig) -> rusqlite::Result<Connection> {
    let conn = Connection::open(&config.database_path)?;
    conn.busy_timeout(config.busy_timeout)?;
    Ok(conn)
}

/// Switch to WAL and create the schema. Returns the journal mode SQLite
/// actually settled on, which is not `wal` for in-memory databases.
pub fn init_db(conn: &Connection) -> rusqlite::Result<String> {
    let mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
    conn.execute_batch(SCHEMA)?;
    Ok(mode)
}

/// Write a canary row and remove it again, so an unwritable store fails here
/// instead of on the first real insert.
fn self_test(conn: &mut Connection) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO expenses (date, amount, category) VALUES ('2000-01-01', 0, '__canary__')",
        [],
    )?;
    let canary = tx.last_insert_rowid();
    tx.execute("DELETE FROM expenses WHERE id = ?1", [canary])?;
    tx.commit()
}

/// Make sure the database file and schema exist and the store accepts writes.
/// Safe to call repeatedly; any failure here must stop the process.
pub fn initialize(config: &StoreConfig) -> Result<()> {
    let path = config.database_path.as_path();
    let fail = |e: rusqlite::Error| ExpenseError::init(path, e);

    create_parent_dir(path)?;
    let mut conn = get_connection(config).map_err(fail)?;
    let mode = init_db(&conn).map_err(fail)?;
    if !mode.eq_ignore_ascii_case("wal") {
        return Err(ExpenseError::init(
            path,
            format!("journal mode is '{mode}', WAL is required"),
        ));
    }
    self_test(&mut conn).map_err(fail)?;

    tracing::info!(path = %path.display(), "database initialized");
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| ExpenseError::init(path, e))
        }
        _ => Ok(()),
    }
}
