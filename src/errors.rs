use std::path::PathBuf;

use thiserror::Error;

/// Error type shared by the loader, the aggregation engine and the adapters.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("missing required column(s): {}", .missing.join(", "))]
    Schema { missing: Vec<String> },
    #[error("row {row}: cannot read {column} value `{value}`: {reason}")]
    Parse {
        row: usize,
        column: String,
        value: String,
        reason: String,
    },
    #[error("no data to analyze")]
    NoData,
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("spreadsheet error in {}: {message}", .path.display())]
    Spreadsheet { path: PathBuf, message: String },
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ExpenseError>;

impl ExpenseError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExpenseError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn spreadsheet(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        ExpenseError::Spreadsheet {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// `NoData` is an empty state rather than a failure.
    pub fn is_empty_state(&self) -> bool {
        matches!(self, ExpenseError::NoData)
    }
}
