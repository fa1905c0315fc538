//! Row codec for the persisted log: `name, amount, category`, no header.

use crate::core::{Category, Expense, ExpenseError};

/// Why a stored row could not be turned into an [`Expense`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The row did not have exactly three fields.
    FieldCount(usize),
    /// The amount field is not a number.
    InvalidAmount(String),
    /// The category field is not a known category.
    UnknownCategory(String),
    /// The fields parsed but describe an invalid expense.
    InvalidExpense(ExpenseError),
    /// The line is not valid UTF-8; holds a lossy rendering of it.
    Undecodable(String),
}

/// A malformed row together with the line it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: u64,
    pub kind: ParseErrorKind,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            ParseErrorKind::FieldCount(n) => write!(f, "expected 3 fields, found {n}"),
            ParseErrorKind::InvalidAmount(a) => write!(f, "invalid amount: {a}"),
            ParseErrorKind::UnknownCategory(c) => write!(f, "unknown category: {c}"),
            ParseErrorKind::InvalidExpense(e) => write!(f, "{e}"),
            ParseErrorKind::Undecodable(text) => write!(f, "not valid UTF-8: {text}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::InvalidExpense(e) => Some(e),
            _ => None,
        }
    }
}

/// A raw stored row and its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub line: u64,
    pub fields: Vec<String>,
}

/// Serializes an expense into the stored field order.
pub fn to_row(expense: &Expense) -> Vec<String> {
    vec![
        expense.name().to_string(),
        expense.amount().to_string(),
        expense.category().to_string(),
    ]
}

/// Decodes one stored row.
pub fn parse_row(row: &Row) -> Result<Expense, ParseError> {
    let fail = |kind| ParseError {
        line: row.line,
        kind,
    };
    let [name, amount, category] = row.fields.as_slice() else {
        return Err(fail(ParseErrorKind::FieldCount(row.fields.len())));
    };
    let amount: f64 = amount
        .trim()
        .parse()
        .map_err(|_| fail(ParseErrorKind::InvalidAmount(amount.clone())))?;
    let category: Category = category
        .parse()
        .map_err(|_| fail(ParseErrorKind::UnknownCategory(category.clone())))?;
    Expense::new(name.clone(), category, amount)
        .map_err(|e| fail(ParseErrorKind::InvalidExpense(e)))
}
