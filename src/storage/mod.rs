//! Persistence for the expense log.

pub mod file;
pub mod row;

use tracing::{info, warn};

use crate::core::{Expense, ExpenseLog};

pub use file::CsvFileStore;
pub use row::{ParseError, ParseErrorKind, Row};

/// Errors raised while reading or writing the expense log.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Csv(String),
    /// One or more rows could not be decoded.
    Rejected(Vec<ParseError>),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "io error: {e}"),
            StorageError::Csv(e) => write!(f, "csv error: {e}"),
            StorageError::Rejected(errors) => {
                write!(f, "{} malformed record(s)", errors.len())?;
                if let Some(first) = errors.first() {
                    write!(f, ", first at {first}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Rejected(errors) => errors
                .first()
                .map(|e| e as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<csv::Error> for StorageError {
    fn from(e: csv::Error) -> Self {
        StorageError::Csv(e.to_string())
    }
}

/// Result of loading a store: the decodable expenses plus the rows that were not.
#[derive(Debug, Default)]
pub struct LoadedLog {
    pub log: ExpenseLog,
    pub rejected: Vec<ParseError>,
}

impl LoadedLog {
    /// Fails if any row was rejected, otherwise returns the log.
    pub fn into_strict(self) -> Result<ExpenseLog, StorageError> {
        if self.rejected.is_empty() {
            Ok(self.log)
        } else {
            Err(StorageError::Rejected(self.rejected))
        }
    }
}

/// Append-only backing store for expense rows.
pub trait ExpenseStore {
    /// Appends one expense to the end of the store.
    fn append(&mut self, expense: &Expense) -> Result<(), StorageError>;
    /// Returns every stored row in order, undecoded.
    ///
    /// A line that cannot even be split into fields is returned as an error
    /// in its place; only failures to reach the store fail the whole call.
    fn rows(&self) -> Result<Vec<Result<Row, ParseError>>, StorageError>;

    /// Decodes every stored row. Malformed rows are collected, not fatal.
    fn load(&self) -> Result<LoadedLog, StorageError> {
        let rows = self.rows()?;
        let mut loaded = LoadedLog::default();
        for entry in rows {
            match entry.and_then(|r| row::parse_row(&r)) {
                Ok(expense) => loaded.log.append(expense),
                Err(e) => {
                    warn!(line = e.line, error = %e, "Skipping malformed record");
                    loaded.rejected.push(e);
                }
            }
        }
        info!(
            loaded = loaded.log.len(),
            rejected = loaded.rejected.len(),
            "Loaded expense log"
        );
        Ok(loaded)
    }
}

/// Store that keeps rows in memory.
#[derive(Default)]
pub struct MemoryStore {
    rows: Vec<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from raw rows, as if they had been read from disk.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

impl ExpenseStore for MemoryStore {
    fn append(&mut self, expense: &Expense) -> Result<(), StorageError> {
        self.rows.push(row::to_row(expense));
        Ok(())
    }

    fn rows(&self) -> Result<Vec<Result<Row, ParseError>>, StorageError> {
        let mut rows = Vec::with_capacity(self.rows.len());
        for (i, fields) in self.rows.iter().enumerate() {
            rows.push(Ok(Row {
                line: i as u64 + 1,
                fields: fields.clone(),
            }));
        }
        Ok(rows)
    }
}
