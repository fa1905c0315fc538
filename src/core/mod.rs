//! Core data model for the expense log.

use serde::{Deserialize, Serialize};

pub mod category;
pub mod summary;

pub use category::{Category, UnknownCategory};
pub use summary::{Comparison, Report, SummaryError, summarize};

/// Errors that can occur when creating an [`Expense`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseError {
    /// The name is empty or only whitespace.
    EmptyName,
    /// The name spans more than one line.
    LineBreakInName,
    /// The amount is below zero.
    NegativeAmount,
    /// The amount is NaN or infinite.
    NonFiniteAmount,
}

impl std::fmt::Display for ExpenseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseError::EmptyName => write!(f, "expense name must not be empty"),
            ExpenseError::LineBreakInName => write!(f, "expense name must be a single line"),
            ExpenseError::NegativeAmount => write!(f, "amount must not be negative"),
            ExpenseError::NonFiniteAmount => write!(f, "amount must be a finite number"),
        }
    }
}

impl std::error::Error for ExpenseError {}

/// A single recorded spending event. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    name: String,
    category: Category,
    amount: f64,
}

impl Expense {
    /// Creates a new expense after validating the name and amount.
    pub fn new(
        name: impl Into<String>,
        category: Category,
        amount: f64,
    ) -> Result<Self, ExpenseError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ExpenseError::EmptyName);
        }
        if name.contains(['\n', '\r']) {
            return Err(ExpenseError::LineBreakInName);
        }
        if !amount.is_finite() {
            return Err(ExpenseError::NonFiniteAmount);
        }
        if amount < 0.0 {
            return Err(ExpenseError::NegativeAmount);
        }
        Ok(Self {
            name,
            category,
            amount,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

impl std::fmt::Display for Expense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, ${:.2}", self.name, self.category, self.amount)
    }
}

/// In-memory append-only list of expenses.
///
/// Position is the only identity; duplicates are allowed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExpenseLog {
    expenses: Vec<Expense>,
}

impl ExpenseLog {
    /// Appends an expense to the end of the log.
    pub fn append(&mut self, expense: Expense) {
        self.expenses.push(expense);
    }

    /// Returns all expenses in insertion order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Lifetime total of every amount in the log.
    pub fn total(&self) -> f64 {
        self.expenses.iter().map(Expense::amount).sum()
    }
}

impl FromIterator<Expense> for ExpenseLog {
    fn from_iter<I: IntoIterator<Item = Expense>>(iter: I) -> Self {
        Self {
            expenses: iter.into_iter().collect(),
        }
    }
}

/// The user's fixed budget for the period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    pub amount: f64,
}

impl BudgetConfig {
    pub fn new(amount: f64) -> Self {
        Self { amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_iterate() {
        let mut log = ExpenseLog::default();
        log.append(Expense::new("first", Category::Food, 1.0).unwrap());
        log.append(Expense::new("second", Category::Rent, 2.0).unwrap());

        let amounts: Vec<_> = log.expenses().iter().map(Expense::amount).collect();
        assert_eq!(amounts, vec![1.0, 2.0]);
        assert_eq!(log.len(), 2);
        assert_eq!(log.total(), 3.0);
    }

    #[test]
    fn duplicates_are_kept() {
        let coffee = Expense::new("Coffee", Category::Food, 5.0).unwrap();
        let log: ExpenseLog = vec![coffee.clone(), coffee].into_iter().collect();
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn rejects_blank_name() {
        assert_eq!(
            Expense::new("   ", Category::Food, 1.0).unwrap_err(),
            ExpenseError::EmptyName
        );
    }

    #[test]
    fn rejects_multiline_name() {
        assert_eq!(
            Expense::new("Coffee\nand cake", Category::Food, 1.0).unwrap_err(),
            ExpenseError::LineBreakInName
        );
    }

    #[test]
    fn rejects_negative_amount() {
        assert_eq!(
            Expense::new("refund", Category::Clothing, -3.0).unwrap_err(),
            ExpenseError::NegativeAmount
        );
    }

    #[test]
    fn rejects_nan_amount() {
        assert_eq!(
            Expense::new("odd", Category::Clothing, f64::NAN).unwrap_err(),
            ExpenseError::NonFiniteAmount
        );
    }

    #[test]
    fn zero_amount_is_allowed() {
        let e = Expense::new("freebie", Category::Entertainment, 0.0).unwrap();
        assert_eq!(e.amount(), 0.0);
    }

    #[test]
    fn display_formats_two_decimals() {
        let e = Expense::new("Shirt", Category::Clothing, 20.0).unwrap();
        assert_eq!(e.to_string(), "Shirt, Clothing, $20.00");
    }
}
