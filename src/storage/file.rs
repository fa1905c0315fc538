use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::path::{Path, PathBuf};
use tracing::info;

use super::{ExpenseStore, ParseError, ParseErrorKind, Row, StorageError, row};
use crate::core::Expense;

/// Store that keeps the log in a header-less CSV file.
///
/// Every physical line is one record. Quoted fields are honoured only when
/// they yield a complete three-field row on that line; otherwise the line is
/// split on bare commas, which is how unescaped names were always written.
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    /// Create a store backed by the file at `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Splits one line into fields.
fn split_line(text: &str) -> Vec<String> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());
    match rdr.records().next() {
        Some(Ok(rec)) if rec.len() == 3 => rec.iter().map(|s| s.to_string()).collect(),
        _ => text.split(',').map(|s| s.trim().to_string()).collect(),
    }
}

impl ExpenseStore for CsvFileStore {
    fn append(&mut self, expense: &Expense) -> Result<(), StorageError> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
        wtr.write_record(row::to_row(expense))?;
        wtr.flush()?;
        info!(path = %self.path.display(), expense = %expense, "Saved expense");
        Ok(())
    }

    fn rows(&self) -> Result<Vec<Result<Row, ParseError>>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read(&self.path)?;
        let mut rows = Vec::new();
        for (i, raw) in content.split(|b| *b == b'\n').enumerate() {
            let line = i as u64 + 1;
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            match std::str::from_utf8(raw) {
                Ok(text) if text.trim().is_empty() => {}
                Ok(text) => rows.push(Ok(Row {
                    line,
                    fields: split_line(text),
                })),
                Err(_) => {
                    let lossy = String::from_utf8_lossy(raw).into_owned();
                    rows.push(Err(ParseError {
                        line,
                        kind: ParseErrorKind::Undecodable(lossy),
                    }));
                }
            }
        }
        Ok(rows)
    }
}
