use rusqlite::{params, Connection};

use crate::db::get_connection;
use crate::error::{ExpenseError, Result};
use crate::models::{CategorySummary, Expense, NewExpense};
use crate::settings::StoreConfig;

// ---------------------------------------------------------------------------
// Queries on a borrowed connection
// ---------------------------------------------------------------------------

pub fn insert_expense(conn: &Connection, expense: &NewExpense) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO expenses (date, amount, category, subcategory, note) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            expense.date,
            expense.amount,
            expense.category,
            expense.subcategory,
            expense.note
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Expenses dated within `[start_date, end_date]`, newest first.
///
/// Dates are compared as text; ISO-8601 strings sort the same as the calendar.
pub fn list_expenses(conn: &Connection, start_date: &str, end_date: &str) -> rusqlite::Result<Vec<Expense>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, amount, category, subcategory, note \
         FROM expenses \
         WHERE date BETWEEN ?1 AND ?2 \
         ORDER BY date DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![start_date, end_date], |row| {
        Ok(Expense {
            id: row.get(0)?,
            date: row.get(1)?,
            amount: row.get(2)?,
            category: row.get(3)?,
            subcategory: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            note: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        })
    })?;
    rows.collect()
}

/// Per-category totals over `[start_date, end_date]`, largest total first.
/// An empty `category` filter means no filter.
pub fn summarize_expenses(
    conn: &Connection,
    start_date: &str,
    end_date: &str,
    category: Option<&str>,
) -> rusqlite::Result<Vec<CategorySummary>> {
    let mut params: Vec<&str> = vec![start_date, end_date];
    let category_clause = match category.filter(|c| !c.is_empty()) {
        Some(c) => {
            params.push(c);
            " AND category = ?3"
        }
        None => "",
    };

    let sql = format!(
        "SELECT category, SUM(amount) AS total_amount, COUNT(*) AS count \
         FROM expenses \
         WHERE date BETWEEN ?1 AND ?2{category_clause} \
         GROUP BY category \
         ORDER BY total_amount DESC, category ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params), |row| {
        Ok(CategorySummary {
            category: row.get(0)?,
            // SUM is NULL when a group holds both +inf and -inf.
            total_amount: row.get::<_, Option<f64>>(1)?.unwrap_or(f64::NAN),
            count: row.get(2)?,
        })
    })?;
    rows.collect()
}

pub fn count_expenses(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT count(*) FROM expenses", [], |row| row.get(0))
}

// ---------------------------------------------------------------------------
// Async repository
// ---------------------------------------------------------------------------

/// Owns all access to the `expenses` table.
///
/// Every call opens its own connection on a blocking worker and drops it when
/// done, so in-flight operations never wait on each other's handles. SQLite
/// (in WAL mode) is the only thing serializing writers.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    config: StoreConfig,
}

impl ExpenseRepository {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Persist one expense as a single atomic row insert and return its id.
    pub async fn insert(&self, expense: NewExpense) -> Result<i64> {
        let id = self
            .with_connection(move |conn| insert_expense(conn, &expense))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "insert failed");
                ExpenseError::write(e)
            })?;
        tracing::debug!(id, "expense inserted");
        Ok(id)
    }

    pub async fn list(&self, start_date: &str, end_date: &str) -> Result<Vec<Expense>> {
        let (start, end) = (start_date.to_string(), end_date.to_string());
        let rows = self
            .with_connection(move |conn| list_expenses(conn, &start, &end))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "list failed");
                ExpenseError::read(e)
            })?;
        tracing::debug!(start_date, end_date, rows = rows.len(), "expenses listed");
        Ok(rows)
    }

    pub async fn summarize(
        &self,
        start_date: &str,
        end_date: &str,
        category: Option<&str>,
    ) -> Result<Vec<CategorySummary>> {
        let (start, end) = (start_date.to_string(), end_date.to_string());
        let category = category.map(str::to_string);
        let groups = self
            .with_connection(move |conn| summarize_expenses(conn, &start, &end, category.as_deref()))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "summarize failed");
                ExpenseError::read(e)
            })?;
        tracing::debug!(start_date, end_date, groups = groups.len(), "expenses summarized");
        Ok(groups)
    }

    pub async fn count(&self) -> Result<i64> {
        self.with_connection(count_expenses).await.map_err(ExpenseError::read)
    }

    async fn with_connection<T, F>(&self, op: F) -> std::result::Result<T, StoreFailure>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let config = self.config.clone();
        let task = tokio::task::spawn_blocking(move || {
            let conn = get_connection(&config)?;
            op(&conn)
        });
        Ok(task.await??)
    }
}

/// Anything that can go wrong between handing work to a blocking worker and
/// getting rows back.
#[derive(Debug, thiserror::Error)]
enum StoreFailure {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
