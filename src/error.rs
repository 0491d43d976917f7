use std::path::PathBuf;

use thiserror::Error;

/// Underlying cause carried by the storage variants.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum ExpenseError {
    /// The store could not be opened, created or written at startup. Fatal.
    #[error("Storage init error ({}): {source}", path.display())]
    StorageInit {
        path: PathBuf,
        #[source]
        source: Cause,
    },

    #[error("Storage write error: {0}")]
    StorageWrite(#[source] Cause),

    #[error("Storage read error: {0}")]
    StorageRead(#[source] Cause),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ExpenseError {
    pub fn init(path: impl Into<PathBuf>, source: impl Into<Cause>) -> Self {
        Self::StorageInit {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn write(source: impl Into<Cause>) -> Self {
        Self::StorageWrite(source.into())
    }

    pub fn read(source: impl Into<Cause>) -> Self {
        Self::StorageRead(source.into())
    }
}

pub type Result<T> = std::result::Result<T, ExpenseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_keep_cause_message() {
        let err = ExpenseError::write(rusqlite::Error::InvalidQuery);
        assert!(err.to_string().starts_with("Storage write error: "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_init_error_names_path() {
        let err = ExpenseError::init("/nowhere/expenses.db", "disk full");
        assert_eq!(err.to_string(), "Storage init error (/nowhere/expenses.db): disk full");
    }
}
